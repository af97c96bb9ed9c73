//! Benchmark harness using Criterion for latency measurement.
//!
//! Measures:
//! - Arrival that assembles nothing
//! - Arrival that completes a design, by catalog size
//! - Mixed workload over a random catalog
//! - Throughput

use bouquet_engine::{Catalog, Design, Engine, EngineConfig, ScanPolicy, Size, Species};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const SPECIES: &[u8] = b"abcdefgh";

fn species(b: u8) -> Species {
    Species::from_byte(b).unwrap()
}

/// Generate a random but always-valid catalog
fn random_catalog(rng: &mut ChaCha8Rng, designs: usize) -> Catalog {
    Catalog::from_designs((0..designs).map(|i| {
        let name = (b'A' + (i % 26) as u8) as char;
        let size = if rng.gen_bool(0.5) { Size::Large } else { Size::Small };
        let kinds = rng.gen_range(1..=4);
        let required: Vec<(Species, u32)> = SPECIES
            .choose_multiple(rng, kinds)
            .map(|&b| (species(b), rng.gen_range(1..5)))
            .collect();
        let sum: u32 = required.iter().map(|&(_, n)| n).sum();
        let total = sum + rng.gen_range(0..5);
        Design::new(name, size, required, total).unwrap()
    }))
}

/// Generate a random arrival token
fn random_token(rng: &mut ChaCha8Rng) -> String {
    let species = *SPECIES.choose(rng).unwrap() as char;
    let size = if rng.gen_bool(0.5) { 'L' } else { 'S' };
    format!("{species}{size}")
}

/// Benchmark: Arrival that is only stocked (no design can be met)
fn bench_arrival_no_match(c: &mut Criterion) {
    let catalog = Catalog::from_designs([Design::parse("AL1000000a1000000").unwrap()]);
    let mut engine = Engine::new(catalog, EngineConfig::default());

    c.bench_function("arrival_no_match", |b| {
        b.iter(|| black_box(engine.process_line(black_box("bL"))))
    });
}

/// Benchmark: Arrival that completes a design, with the winner at the end
/// of catalogs of growing size
fn bench_arrival_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrival_full_match");

    for depth in [1usize, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            // Unreachable designs in front, the matching one last
            let mut designs: Vec<_> = (1..depth)
                .map(|_| Design::parse("XL1a1000").unwrap())
                .collect();
            designs.push(Design::parse("AL1a1b2").unwrap());

            let config = EngineConfig::default().with_scan(ScanPolicy::AllDesigns);
            let mut engine = Engine::new(Catalog::from_designs(designs), config);

            b.iter(|| {
                engine.process_line("aL");
                black_box(engine.process_line("bL"))
            })
        });
    }

    group.finish();
}

/// Benchmark: Mixed workload over a random catalog
fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_workload");

    for scan in [ScanPolicy::ArrivedSpecies, ScanPolicy::AllDesigns] {
        group.bench_function(format!("{scan:?}"), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(0xDEADBEEF);
            let catalog = random_catalog(&mut rng, 40);
            let mut engine = Engine::new(catalog, EngineConfig::default().with_scan(scan));

            let tokens: Vec<_> = (0..4096).map(|_| random_token(&mut rng)).collect();
            let mut i = 0;

            b.iter(|| {
                i = (i + 1) % tokens.len();
                black_box(engine.process_line(&tokens[i]))
            })
        });
    }

    group.finish();
}

/// Benchmark: Throughput (arrivals per second)
fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.throughput(criterion::Throughput::Elements(1000));

    group.bench_function("1000_arrivals", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(0xCAFEBABE);
        let tokens: Vec<_> = (0..1000).map(|_| random_token(&mut rng)).collect();

        b.iter(|| {
            let catalog = random_catalog(&mut ChaCha8Rng::seed_from_u64(7), 20);
            let mut engine = Engine::new(catalog, EngineConfig::default());
            for token in &tokens {
                black_box(engine.process_line(token));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_arrival_no_match,
    bench_arrival_full_match,
    bench_mixed_workload,
    bench_throughput,
);

criterion_main!(benches);
