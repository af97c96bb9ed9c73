//! Catalog - Designs grouped by size class, in registration order.
//!
//! Registration order is the tie-break between competing designs, so it is
//! preserved both in the per-size design lists and in the per-species
//! candidate index.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::command::{Size, Species};
use crate::config::DesignPolicy;
use crate::design::Design;
use crate::error::{EngineError, Result};
use crate::source::LineSource;

/// Position of a design within its size class.
pub type DesignIndex = u32;

/// Read-only set of designs, built once before any arrival is processed.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Designs per size class, in registration order
    designs: [Vec<Design>; 2],
    /// Species -> positions of the designs that require it, ascending
    by_species: [FxHashMap<Species, Vec<DesignIndex>>; 2],
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an ordered collection of designs.
    pub fn from_designs(designs: impl IntoIterator<Item = Design>) -> Self {
        let mut catalog = Self::new();
        for design in designs {
            catalog.push(design);
        }
        catalog
    }

    /// Read design lines from `source` up to the first blank line.
    ///
    /// Malformed lines are logged and skipped, or abort the build, depending
    /// on `policy`. A failed line never reaches the catalog.
    pub fn build<S: LineSource + ?Sized>(source: &mut S, policy: DesignPolicy) -> Result<Self> {
        let mut catalog = Self::new();
        let mut line_no = 0usize;

        loop {
            let line = source.next_line()?;
            if line.is_empty() {
                break;
            }
            line_no += 1;

            match Design::parse(&line) {
                Ok(design) => {
                    debug!(line_no, design = %design, "registered design");
                    catalog.push(design);
                }
                Err(error) => match policy {
                    DesignPolicy::Skip => {
                        warn!(line_no, line = %line, %error, "skipping malformed design");
                    }
                    DesignPolicy::Abort => {
                        return Err(EngineError::MalformedDesign { line_no, line, source: error });
                    }
                },
            }
        }

        debug!(
            large = catalog.designs(Size::Large).len(),
            small = catalog.designs(Size::Small).len(),
            "catalog built"
        );
        Ok(catalog)
    }

    /// Register a design at the end of its size class.
    pub fn push(&mut self, design: Design) -> DesignIndex {
        let size = design.size().index();
        let index = self.designs[size].len() as DesignIndex;
        for &(species, _) in design.required() {
            self.by_species[size].entry(species).or_default().push(index);
        }
        self.designs[size].push(design);
        index
    }

    /// All designs of one size class, in registration order.
    #[inline]
    pub fn designs(&self, size: Size) -> &[Design] {
        &self.designs[size.index()]
    }

    /// Designs of one size class that require `species`, in registration order.
    pub fn requiring(&self, size: Size, species: Species) -> impl Iterator<Item = &Design> + '_ {
        let designs = &self.designs[size.index()];
        self.by_species[size.index()]
            .get(&species)
            .into_iter()
            .flatten()
            .map(move |&index| &designs[index as usize])
    }

    /// Total number of designs across both sizes.
    pub fn len(&self) -> usize {
        self.designs.iter().map(Vec::len).sum()
    }

    /// Returns true if no design was registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
