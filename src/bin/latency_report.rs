use bouquet_engine::{Catalog, Design, Engine, EngineConfig};
use hdrhistogram::Histogram;
use std::time::Instant;

const DESIGNS: &[&str] = &[
    "AL2a1b5", "BL1c3", "CL2d2e6", "DL1a1f4", "AS1a2", "BS2b1c4", "CS3d3", "DS1e1f1g5",
];

const SPECIES: &[u8] = b"abcdefg";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Preparing Latency Benchmark...");

    // Setup
    let designs = DESIGNS
        .iter()
        .map(|line| Design::parse(line))
        .collect::<Result<Vec<_>, _>>()?;
    let mut engine = Engine::new(Catalog::from_designs(designs), EngineConfig::default());

    let mut histogram = Histogram::<u64>::new_with_bounds(1, 100_000, 3)?;

    const ITERATIONS: u64 = 1_000_000;

    // Pre-build tokens so formatting stays out of the measured section
    let tokens: Vec<String> = (0..ITERATIONS)
        .map(|i| {
            let species = SPECIES[(i * 7 % SPECIES.len() as u64) as usize] as char;
            let size = if i % 3 == 0 { 'S' } else { 'L' };
            format!("{species}{size}")
        })
        .collect();

    println!("Running {} iterations...", ITERATIONS);

    let mut total_duration = std::time::Duration::new(0, 0);

    for token in &tokens {
        // Critical measurement section
        let start = Instant::now();

        // Use black_box to prevent compiler optimization
        std::hint::black_box(engine.process_line(token));

        let elapsed = start.elapsed();

        // Outliers above the histogram bound are dropped
        histogram.record(elapsed.as_nanos() as u64).unwrap_or(());
        total_duration += elapsed;
    }

    let stats = engine.stats();

    println!("\n=== Latency Report (ns) ===");
    println!("Total Ops:  {}", ITERATIONS);
    println!("Bouquets:   {}", stats.bouquets);
    println!("Throughput: {:.2} ops/sec", ITERATIONS as f64 / total_duration.as_secs_f64());
    println!("---------------------------");
    println!("Min:    {:6} ns", histogram.min());
    println!("P50:    {:6} ns", histogram.value_at_quantile(0.50));
    println!("P90:    {:6} ns", histogram.value_at_quantile(0.90));
    println!("P99:    {:6} ns", histogram.value_at_quantile(0.99));
    println!("P99.9:  {:6} ns", histogram.value_at_quantile(0.999));
    println!("P99.99: {:6} ns", histogram.value_at_quantile(0.9999));
    println!("Max:    {:6} ns", histogram.max());
    println!("---------------------------");

    // Quick ASCII histogram
    println!("\nDistribution:");
    for v in histogram.iter_log(1, 2.0) {
        let count = v.count_since_last_iteration();
        if count > 0 {
            println!("<= {:6} ns: {:10} count", v.value_iterated_to(), count);
        }
    }

    Ok(())
}
