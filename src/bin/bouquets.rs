//! Bouquet assembly CLI.
//!
//! Reads a design block and an arrival stream from a file (or stdin) and
//! writes one line per assembled bouquet to stdout. Diagnostics go to
//! stderr; set `RUST_LOG=debug` to see every registered design and bouquet.
//!
//! ```text
//! bouquets input.txt
//! bouquets --scan all-designs --format csv < input.txt
//! ```

use std::error::Error;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use bouquet_engine::{
    BouquetSink, CsvSink, DesignPolicy, Engine, EngineConfig, FlowerFile, LineSink, LineSource,
    ReaderSource, RunStats, ScanPolicy,
};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "bouquets", version, about = "Assemble bouquets from a flower arrival stream")]
struct Args {
    /// Input file with the design block and arrivals (stdin when omitted)
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for bouquets
    #[arg(long, value_enum, default_value_t = Format::Line)]
    format: Format,

    /// Which designs to test after each arrival (overrides the config file)
    #[arg(long, value_enum)]
    scan: Option<Scan>,

    /// Abort on the first malformed design line instead of skipping it
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Line,
    Csv,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scan {
    ArrivedSpecies,
    AllDesigns,
}

impl From<Scan> for ScanPolicy {
    fn from(scan: Scan) -> Self {
        match scan {
            Scan::ArrivedSpecies => ScanPolicy::ArrivedSpecies,
            Scan::AllDesigns => ScanPolicy::AllDesigns,
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(stats) => {
            info!(bouquets = stats.bouquets, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<RunStats, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(scan) = args.scan {
        config.scan = scan.into();
    }
    if args.strict {
        config.designs = DesignPolicy::Abort;
    }
    info!(?config, input = ?args.input, "starting");

    let mut source: Box<dyn LineSource> = match &args.input {
        Some(path) => Box::new(FlowerFile::open(path)?),
        None => Box::new(ReaderSource::stdin()),
    };

    let stdout = BufWriter::new(io::stdout().lock());
    let mut sink: Box<dyn BouquetSink> = match args.format {
        Format::Line => Box::new(LineSink::new(stdout)),
        Format::Csv => Box::new(CsvSink::new(stdout)),
    };

    let mut engine = Engine::from_source(&mut *source, config)?;
    let stats = engine.run(&mut *source, &mut *sink)?;
    Ok(stats)
}
