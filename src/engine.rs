//! Engine - Drives the matching engine from a line source into a sink.
//!
//! Wraps the matching engine with token decoding, logging and run
//! statistics. Processing is strictly sequential: arrival N is fully matched
//! before arrival N+1 is read.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::command::{Arrival, ArrivalRejected, OutputEvent, Size, Species};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::matching::MatchingEngine;
use crate::sink::BouquetSink;
use crate::source::LineSource;

/// Counters for one run of the arrival phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Arrivals that were decoded and stocked
    pub accepted: u64,
    /// Arrival tokens that could not be decoded
    pub rejected: u64,
    /// Bouquets handed to the sink
    pub bouquets: u64,
}

/// The main engine that processes arrival lines.
#[derive(Debug)]
pub struct Engine {
    /// The underlying matching engine
    pub matcher: MatchingEngine,
    stats: RunStats,
}

impl Engine {
    /// Create a new engine over an already-built catalog.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self {
            matcher: MatchingEngine::new(catalog, config.scan),
            stats: RunStats::default(),
        }
    }

    /// Build the catalog from the design block of `source`, then create the
    /// engine. The source is left positioned at the first arrival.
    pub fn from_source<S: LineSource + ?Sized>(source: &mut S, config: EngineConfig) -> Result<Self> {
        let catalog = Catalog::build(source, config.designs)?;
        info!(designs = catalog.len(), "catalog ready");
        Ok(Self::new(catalog, config))
    }

    /// Run the arrival phase until the source yields an empty line.
    ///
    /// Every bouquet is handed to `sink` in assembly order. Read and write
    /// failures stop the run; undecodable tokens are logged and skipped.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<RunStats>
    where
        S: LineSource + ?Sized,
        K: BouquetSink + ?Sized,
    {
        loop {
            let line = source.next_line()?;
            if line.is_empty() {
                break;
            }
            if let Some(OutputEvent::Assembled(bouquet)) = self.process_line(&line) {
                sink.emit(&bouquet)?;
            }
        }
        sink.flush()?;

        info!(
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            bouquets = self.stats.bouquets,
            "arrival stream finished"
        );
        Ok(self.stats)
    }

    /// Process a single arrival token.
    ///
    /// This is the main entry point for synchronous usage (testing, benchmarks).
    ///
    /// # Returns
    /// `Rejected` for an undecodable token (no state change), `Assembled`
    /// when the arrival completed a design, `None` otherwise.
    pub fn process_line(&mut self, token: &str) -> Option<OutputEvent> {
        let arrival = match Arrival::parse(token) {
            Ok(arrival) => arrival,
            Err(reason) => {
                warn!(token, %reason, "rejecting arrival");
                self.stats.rejected += 1;
                return Some(OutputEvent::Rejected(ArrivalRejected {
                    token: token.to_owned(),
                    reason,
                }));
            }
        };

        self.stats.accepted += 1;
        let bouquet = self.matcher.process_arrival(arrival)?;
        debug!(bouquet = %bouquet, "assembled");
        self.stats.bouquets += 1;
        Some(OutputEvent::Assembled(bouquet))
    }

    /// Counters accumulated so far.
    #[inline]
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        self.matcher.catalog()
    }

    /// On-hand count of one species in one size class.
    #[inline]
    pub fn on_hand(&self, size: Size, species: Species) -> u64 {
        self.matcher.on_hand(size, species)
    }

    /// Running total for one size class.
    #[inline]
    pub fn running_total(&self, size: Size) -> u64 {
        self.matcher.running_total(size)
    }

    /// Compute state hash for determinism testing.
    #[inline]
    pub fn state_hash(&self) -> u64 {
        self.matcher.state_hash()
    }
}
