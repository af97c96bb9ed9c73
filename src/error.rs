//! Error types for the bouquet engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a design line failed to parse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DesignParseError {
    #[error("design line does not match <Name><L|S>(<count><species>)+<total>")]
    Malformed,

    #[error("design name must be an uppercase letter, found {0:?}")]
    InvalidName(char),

    #[error("design has no required species")]
    NoRequiredSpecies,

    #[error("count at column {column} does not fit in 32 bits")]
    CountOverflow { column: usize },

    #[error("total {total} is below the {required} required flowers")]
    TotalBelowRequired { total: u32, required: u64 },
}

/// Why an arrival token was rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ArrivalError {
    #[error("arrival token must be 2 characters, got {0}")]
    WrongLength(usize),

    #[error("invalid species {0:?} (expected a lowercase letter)")]
    InvalidSpecies(char),

    #[error("unknown size class {0:?} (expected 'L' or 'S')")]
    UnknownSize(char),
}

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input could not be opened
    #[error("cannot open input {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A design line was malformed and the catalog policy is to abort
    #[error("malformed design on line {line_no} ({line:?}): {source}")]
    MalformedDesign {
        line_no: usize,
        line: String,
        #[source]
        source: DesignParseError,
    },

    /// Reading the stream or writing a bouquet failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
