//! # Bouquet Engine
//!
//! A deterministic, greedy bouquet assembly engine.
//!
//! ## Design Principles
//!
//! - **Single-Writer**: One engine value owns all inventory state (no locks)
//! - **First-Match**: Designs are tried in registration order; the first
//!   satisfiable one is assembled
//! - **Reproducible Slack**: Slack flowers are drawn in first-seen species order
//! - **Inline Storage**: Species maps live in fixed-capacity arrays
//!
//! ## Architecture
//!
//! ```text
//! [LineSource] --designs--> [Catalog]
//!      |                        |
//!      +------arrivals-----> [MatchingEngine] --> [BouquetSink]
//! ```
//!
//! ## Example
//!
//! ```
//! use bouquet_engine::{Bouquet, Engine, EngineConfig, LinesSource};
//!
//! let mut input = LinesSource::new(["AL1a1b3", "", "aL", "bL", "cL"]);
//! let mut engine = Engine::from_source(&mut input, EngineConfig::default()).unwrap();
//!
//! let mut bouquets: Vec<Bouquet> = Vec::new();
//! engine.run(&mut input, &mut bouquets).unwrap();
//!
//! // c is not required by A, so the default scan waits for an a or b arrival
//! assert!(bouquets.is_empty());
//! assert!(engine.process_line("aL").is_some());
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod design;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod matching;
pub mod sink;
pub mod source;

// Re-exports for convenience
pub use catalog::Catalog;
pub use command::{Arrival, ArrivalRejected, Bouquet, OutputEvent, Size, Species, Stems};
pub use config::{DesignPolicy, EngineConfig, ScanPolicy};
pub use design::Design;
pub use engine::{Engine, RunStats};
pub use error::{ArrivalError, ConfigError, DesignParseError, EngineError};
pub use inventory::Inventory;
pub use matching::MatchingEngine;
pub use sink::{BouquetSink, CsvSink, LineSink};
pub use source::{FlowerFile, LineSource, LinesSource, ReaderSource};
