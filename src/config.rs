//! Engine configuration.
//!
//! Loaded from TOML so scan and catalog behaviour can be changed without
//! code changes. Every field has a default, so an empty file is valid:
//!
//! ```
//! use bouquet_engine::{DesignPolicy, EngineConfig, ScanPolicy};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     scan = "all_designs"
//!     designs = "abort"
//! "#).unwrap();
//!
//! assert_eq!(config.scan, ScanPolicy::AllDesigns);
//! assert_eq!(config.designs, DesignPolicy::Abort);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Which designs are tested for satisfiability after an arrival.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Only designs of the arrival's size that require the arrived species.
    #[default]
    ArrivedSpecies,
    /// Every design of the arrival's size.
    AllDesigns,
}

/// What to do with a design line that does not parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignPolicy {
    /// Log the line and continue building the catalog.
    #[default]
    Skip,
    /// Stop with an error.
    Abort,
}

/// Main engine configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Candidate selection after each arrival
    pub scan: ScanPolicy,
    /// Handling of malformed design lines
    pub designs: DesignPolicy,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_scan(mut self, scan: ScanPolicy) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_designs(mut self, designs: DesignPolicy) -> Self {
        self.designs = designs;
        self
    }
}
