//! Inventory - On-hand flower counts for a single size class.
//!
//! Species are kept in first-seen order. That order is also the order in
//! which slack flowers are drawn, so allocation results are reproducible.

use arrayvec::ArrayVec;

use crate::command::{Species, Stems, SPECIES_COUNT};
use crate::design::Design;

/// On-hand counts. Wider than [`Stems`] because the arrival stream is unbounded.
type Stock = ArrayVec<(Species, u64), SPECIES_COUNT>;

/// Per-size stock of flowers plus its running total.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    /// Species -> on-hand count, in first-seen order
    stock: Stock,
    /// Sum of all counts in `stock`
    total: u64,
}

impl Inventory {
    /// Create an empty inventory
    #[inline]
    pub const fn new() -> Self {
        Self {
            stock: Stock::new_const(),
            total: 0,
        }
    }

    /// Record one arriving flower.
    #[inline]
    pub fn add(&mut self, species: Species) {
        match self.stock.iter_mut().find(|(s, _)| *s == species) {
            Some(entry) => entry.1 += 1,
            None => self.stock.push((species, 1)),
        }
        self.total += 1;
    }

    /// On-hand count for one species.
    #[inline]
    pub fn count(&self, species: Species) -> u64 {
        self.stock
            .iter()
            .find(|(s, _)| *s == species)
            .map_or(0, |&(_, n)| n)
    }

    /// Running total of flowers on hand.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns true if no flowers are on hand
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate `(species, count)` in first-seen order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (Species, u64)> + '_ {
        self.stock.iter().copied()
    }

    /// Whether `design` can be assembled from what is on hand.
    ///
    /// The running total must cover the design total, and every required
    /// species must be on hand in at least its required count.
    #[inline]
    pub fn satisfies(&self, design: &Design) -> bool {
        self.total >= u64::from(design.total())
            && design
                .required()
                .iter()
                .all(|&(species, needed)| self.count(species) >= u64::from(needed))
    }

    /// Assemble `design`, removing its flowers and returning what was taken.
    ///
    /// Required species are taken first, then the slack is filled greedily
    /// by walking the stock in first-seen order.
    ///
    /// # Panics
    /// If the design is not satisfiable. Callers check [`Self::satisfies`]
    /// first, so a panic here means the bookkeeping is corrupt.
    pub fn allocate(&mut self, design: &Design) -> Stems {
        assert!(
            self.satisfies(design),
            "design {} allocated without being satisfiable",
            design.name()
        );

        let mut taken = Stems::new();

        for &(species, needed) in design.required() {
            self.take(species, needed);
            taken.push((species, needed));
        }

        let mut left = design.slack();
        for entry in self.stock.iter_mut() {
            if left == 0 {
                break;
            }
            let (species, on_hand) = *entry;
            if on_hand == 0 {
                continue;
            }

            // Bounded by `left`, so it fits the bouquet's u32 counts
            let amount = on_hand.min(u64::from(left)) as u32;
            entry.1 -= u64::from(amount);
            left -= amount;

            match taken.iter_mut().find(|(s, _)| *s == species) {
                Some(stem) => stem.1 += amount,
                None => taken.push((species, amount)),
            }
        }

        assert_eq!(
            left, 0,
            "slack for design {} could not be filled from inventory",
            design.name()
        );

        self.total -= u64::from(design.total());
        self.debug_check_conservation();

        taken
    }

    /// Remove `n` flowers of one species.
    fn take(&mut self, species: Species, n: u32) {
        if n == 0 {
            return;
        }
        let entry = self
            .stock
            .iter_mut()
            .find(|(s, _)| *s == species)
            .expect("required species missing from a satisfiable inventory");
        entry.1 -= u64::from(n);
    }

    #[inline]
    fn debug_check_conservation(&self) {
        debug_assert_eq!(
            self.total,
            self.stock.iter().map(|&(_, n)| n).sum::<u64>(),
            "running total drifted from inventory"
        );
    }
}
