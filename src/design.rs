//! Design - A bouquet recipe parsed from one header line.
//!
//! Grammar (full-line match):
//!
//! ```text
//! <Name: A-Z><Size: L|S>(<count><species: a-z>)+<total>
//! ```
//!
//! For example `AL3r4t8` is design `A`, large, three `r`, four `t`, eight
//! flowers in total, leaving one slack flower of any species.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::command::{Size, Species, Stems};
use crate::error::DesignParseError;

/// A whole design line. `[0-9]` rather than `\d`, which also matches
/// non-ASCII digits.
static DESIGN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z])([LS])((?:[0-9]+[a-z])+)([0-9]+)$").expect("design line pattern")
});

/// One `<count><species>` pair inside the required group.
static STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)([a-z])").expect("stem pattern"));

/// An immutable bouquet recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Design {
    name: char,
    size: Size,
    /// Required species in first-appearance order
    required: Stems,
    total: u32,
    /// `total - sum(required)`, validated non-negative at construction
    slack: u32,
}

impl Design {
    /// Build a design from already-decoded parts.
    ///
    /// Duplicate species keep the position of their first occurrence and
    /// the count of their last.
    pub fn new(
        name: char,
        size: Size,
        required: impl IntoIterator<Item = (Species, u32)>,
        total: u32,
    ) -> Result<Self, DesignParseError> {
        if !name.is_ascii_uppercase() {
            return Err(DesignParseError::InvalidName(name));
        }

        let mut stems = Stems::new();
        for (species, count) in required {
            match stems.iter_mut().find(|(s, _)| *s == species) {
                Some(entry) => entry.1 = count,
                // At most 26 distinct species exist, so the push cannot overflow
                None => stems.push((species, count)),
            }
        }
        if stems.is_empty() {
            return Err(DesignParseError::NoRequiredSpecies);
        }

        let required_sum: u64 = stems.iter().map(|&(_, n)| u64::from(n)).sum();
        if u64::from(total) < required_sum {
            return Err(DesignParseError::TotalBelowRequired {
                total,
                required: required_sum,
            });
        }

        Ok(Self {
            name,
            size,
            required: stems,
            total,
            slack: total - required_sum as u32,
        })
    }

    /// Parse a design line.
    pub fn parse(line: &str) -> Result<Self, DesignParseError> {
        let caps = DESIGN_LINE
            .captures(line)
            .ok_or(DesignParseError::Malformed)?;

        let name = char::from(caps[1].as_bytes()[0]);
        let size = Size::from_byte(caps[2].as_bytes()[0]).ok_or(DesignParseError::Malformed)?;

        let stems = caps.get(3).ok_or(DesignParseError::Malformed)?;
        let mut pairs: Vec<(Species, u32)> = Vec::new();
        for stem in STEM.captures_iter(stems.as_str()) {
            let Some(count) = stem.get(1) else { continue };
            let species =
                Species::from_byte(stem[2].as_bytes()[0]).ok_or(DesignParseError::Malformed)?;
            pairs.push((species, parse_count(count.as_str(), stems.start() + count.start())?));
        }

        let total = caps.get(4).ok_or(DesignParseError::Malformed)?;
        let total = parse_count(total.as_str(), total.start())?;

        Self::new(name, size, pairs, total)
    }

    #[inline]
    pub fn name(&self) -> char {
        self.name
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Required species and their minimum counts, in design order.
    #[inline]
    pub fn required(&self) -> &[(Species, u32)] {
        &self.required
    }

    /// Minimum count for one species (0 when not required).
    pub fn required_count(&self, species: Species) -> u32 {
        self.required
            .iter()
            .find(|(s, _)| *s == species)
            .map_or(0, |&(_, n)| n)
    }

    /// Whether the design lists `species` among its required flowers.
    pub fn requires(&self, species: Species) -> bool {
        self.required.iter().any(|(s, _)| *s == species)
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Flowers of any species needed on top of the required ones.
    #[inline]
    pub fn slack(&self) -> u32 {
        self.slack
    }
}

impl fmt::Display for Design {
    /// Serialise back to the header-line grammar.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.size)?;
        for &(species, count) in &self.required {
            write!(f, "{}{}", count, species)?;
        }
        write!(f, "{}", self.total)
    }
}

/// Decode one count; `offset` is its byte position in the line.
fn parse_count(digits: &str, offset: usize) -> Result<u32, DesignParseError> {
    digits
        .parse()
        .map_err(|_| DesignParseError::CountOverflow { column: offset + 1 })
}
