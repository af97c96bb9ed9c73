//! Arrival and Event types for the bouquet engine.
//!
//! Arrivals are inputs decoded from the flower stream.
//! Events are outputs handed to a bouquet sink.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::ArrivalError;

/// Number of distinct species letters (`a..=z`).
pub const SPECIES_COUNT: usize = 26;

/// Species-keyed counts, stored inline in insertion order.
pub type Stems = ArrayVec<(Species, u32), SPECIES_COUNT>;

/// Flower size class (large or small)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Size {
    /// Large flowers and designs (`L`)
    Large = 0,
    /// Small flowers and designs (`S`)
    Small = 1,
}

impl Size {
    /// Both size classes, in index order.
    pub const ALL: [Size; 2] = [Size::Large, Size::Small];

    /// Decode a size letter.
    #[inline]
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'L' => Some(Size::Large),
            b'S' => Some(Size::Small),
            _ => None,
        }
    }

    /// The letter used on the wire.
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Size::Large => 'L',
            Size::Small => 'S',
        }
    }

    /// Dense index for per-size arrays
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A flower species, one lowercase ASCII letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Species(u8);

impl Species {
    /// Decode a species letter.
    #[inline]
    pub const fn from_byte(b: u8) -> Option<Self> {
        if b.is_ascii_lowercase() {
            Some(Species(b))
        } else {
            None
        }
    }

    /// Build a species from a `char`, if it is `a..=z`.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        u8::try_from(c).ok().and_then(Self::from_byte)
    }

    #[inline]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    #[inline]
    pub const fn as_byte(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ============================================================================
// Input
// ============================================================================

/// One incoming flower
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrival {
    /// Flower species
    pub species: Species,
    /// Size class the flower belongs to
    pub size: Size,
}

impl Arrival {
    pub const fn new(species: Species, size: Size) -> Self {
        Self { species, size }
    }

    /// Decode a two-character arrival token such as `rL`.
    pub fn parse(token: &str) -> Result<Self, ArrivalError> {
        let mut chars = token.chars();
        let (Some(species), Some(size), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ArrivalError::WrongLength(token.chars().count()));
        };
        let species = Species::from_char(species).ok_or(ArrivalError::InvalidSpecies(species))?;
        let size = u8::try_from(size)
            .ok()
            .and_then(Size::from_byte)
            .ok_or(ArrivalError::UnknownSize(size))?;
        Ok(Self { species, size })
    }
}

// ============================================================================
// Output Events
// ============================================================================

/// An assembled bouquet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bouquet {
    /// Name of the design that was assembled
    pub design: char,
    /// Size class of the design
    pub size: Size,
    /// Consumed stems per species, required species first
    pub stems: Stems,
}

impl Bouquet {
    /// Total number of flowers in the bouquet.
    pub fn flower_count(&self) -> u32 {
        self.stems.iter().map(|&(_, n)| n).sum()
    }

    /// Number of stems of one species.
    pub fn count_of(&self, species: Species) -> u32 {
        self.stems
            .iter()
            .find(|(s, _)| *s == species)
            .map_or(0, |&(_, n)| n)
    }
}

impl fmt::Display for Bouquet {
    /// Wire form: `<design><size><species><count>...`, zero counts omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.design, self.size)?;
        for &(species, count) in self.stems.iter().filter(|(_, n)| *n > 0) {
            write!(f, "{}{}", species, count)?;
        }
        Ok(())
    }
}

/// An arrival token was rejected before touching any inventory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrivalRejected {
    /// The raw token as read from the stream
    pub token: String,
    pub reason: ArrivalError,
}

/// Output events from the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputEvent {
    /// A design was satisfied and assembled
    Assembled(Bouquet),
    /// The arrival token could not be decoded
    Rejected(ArrivalRejected),
}
