//! Matching Engine - Core bouquet assembly algorithm.
//!
//! For every arrival:
//! 1. STOCKING: Add the flower to its size class inventory
//! 2. SELECTION: Find the first satisfiable design in registration order
//! 3. ASSEMBLY: Take required flowers, fill the slack greedily, emit

use crate::catalog::Catalog;
use crate::command::{Arrival, Bouquet, Size, Species};
use crate::config::ScanPolicy;
use crate::design::Design;
use crate::inventory::Inventory;

/// The matching engine core
#[derive(Debug)]
pub struct MatchingEngine {
    /// Designs, read-only after construction
    catalog: Catalog,
    /// One inventory per size class, indexed by [`Size::index`]
    inventories: [Inventory; 2],
    /// Candidate selection policy
    scan: ScanPolicy,
}

impl MatchingEngine {
    /// Create a new matching engine over a built catalog
    pub fn new(catalog: Catalog, scan: ScanPolicy) -> Self {
        Self {
            catalog,
            inventories: [Inventory::new(), Inventory::new()],
            scan,
        }
    }

    /// Process one arrival.
    ///
    /// # Algorithm
    /// 1. Add the flower to the inventory of its size (unconditionally)
    /// 2. Scan candidate designs of that size in registration order
    /// 3. Assemble the first satisfiable one, if any
    ///
    /// # Returns
    /// The assembled bouquet, or `None` if no design is satisfiable yet
    pub fn process_arrival(&mut self, arrival: Arrival) -> Option<Bouquet> {
        let Self {
            catalog,
            inventories,
            scan,
        } = self;
        let inventory = &mut inventories[arrival.size.index()];

        // Phase 1: STOCKING
        inventory.add(arrival.species);

        // Phase 2: SELECTION
        let design = select(catalog, inventory, *scan, arrival)?;

        // Phase 3: ASSEMBLY
        Some(assemble(inventory, design))
    }

    /// First design of `size` that could be assembled right now, without
    /// assembling it. Considers every design of the size.
    pub fn find_satisfiable(&self, size: Size) -> Option<&Design> {
        let inventory = &self.inventories[size.index()];
        self.catalog
            .designs(size)
            .iter()
            .find(|design| inventory.satisfies(design))
    }

    // ========================================================================
    // Utility Methods
    // ========================================================================

    /// The catalog this engine matches against
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn scan_policy(&self) -> ScanPolicy {
        self.scan
    }

    /// Inventory of one size class
    #[inline]
    pub fn inventory(&self, size: Size) -> &Inventory {
        &self.inventories[size.index()]
    }

    /// On-hand count of one species in one size class
    #[inline]
    pub fn on_hand(&self, size: Size, species: Species) -> u64 {
        self.inventories[size.index()].count(species)
    }

    /// Running total of flowers on hand for one size class
    #[inline]
    pub fn running_total(&self, size: Size) -> u64 {
        self.inventories[size.index()].total()
    }

    /// Compute a hash of the current state (for determinism testing)
    pub fn state_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        for size in Size::ALL {
            let inventory = self.inventory(size);
            size.hash(&mut hasher);
            inventory.total().hash(&mut hasher);
            for (species, count) in inventory.iter() {
                species.hash(&mut hasher);
                count.hash(&mut hasher);
            }
        }

        hasher.finish()
    }
}

/// Pick the first satisfiable candidate for an arrival.
#[inline]
fn select<'c>(
    catalog: &'c Catalog,
    inventory: &Inventory,
    scan: ScanPolicy,
    arrival: Arrival,
) -> Option<&'c Design> {
    match scan {
        ScanPolicy::ArrivedSpecies => catalog
            .requiring(arrival.size, arrival.species)
            .find(|design| inventory.satisfies(design)),
        ScanPolicy::AllDesigns => catalog
            .designs(arrival.size)
            .iter()
            .find(|design| inventory.satisfies(design)),
    }
}

/// Remove a satisfiable design's flowers and build the bouquet.
fn assemble(inventory: &mut Inventory, design: &Design) -> Bouquet {
    let stems = inventory.allocate(design);
    Bouquet {
        design: design.name(),
        size: design.size(),
        stems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(c: char) -> Species {
        Species::from_char(c).unwrap()
    }

    fn engine(designs: &[&str], scan: ScanPolicy) -> MatchingEngine {
        let catalog = Catalog::from_designs(designs.iter().map(|l| Design::parse(l).unwrap()));
        MatchingEngine::new(catalog, scan)
    }

    fn arrive(engine: &mut MatchingEngine, token: &str) -> Option<Bouquet> {
        engine.process_arrival(Arrival::parse(token).unwrap())
    }

    fn assert_conserved(engine: &MatchingEngine) {
        for size in Size::ALL {
            let inventory = engine.inventory(size);
            let sum: u64 = inventory.iter().map(|(_, n)| n).sum();
            assert_eq!(sum, engine.running_total(size), "conservation broken for {size}");
        }
    }

    #[test]
    fn test_arrival_without_match() {
        let mut engine = engine(&["AL2a2"], ScanPolicy::ArrivedSpecies);

        assert_eq!(arrive(&mut engine, "aL"), None);
        assert_eq!(engine.on_hand(Size::Large, sp('a')), 1);
        assert_eq!(engine.running_total(Size::Large), 1);
        assert_eq!(engine.running_total(Size::Small), 0);
    }

    #[test]
    fn test_simple_match_consumes_flowers() {
        let mut engine = engine(&["AL2a2"], ScanPolicy::ArrivedSpecies);

        arrive(&mut engine, "aL");
        let bouquet = arrive(&mut engine, "aL").unwrap();

        assert_eq!(bouquet.to_string(), "ALa2");
        assert_eq!(engine.on_hand(Size::Large, sp('a')), 0);
        assert_eq!(engine.running_total(Size::Large), 0);
    }

    #[test]
    fn test_sizes_are_independent() {
        let mut engine = engine(&["AL2a2", "BS2a2"], ScanPolicy::ArrivedSpecies);

        assert_eq!(arrive(&mut engine, "aL"), None);
        assert_eq!(arrive(&mut engine, "aS"), None);
        let bouquet = arrive(&mut engine, "aS").unwrap();

        assert_eq!(bouquet.design, 'B');
        assert_eq!(engine.on_hand(Size::Large, sp('a')), 1);
        assert_eq!(engine.running_total(Size::Small), 0);
    }

    #[test]
    fn test_first_registered_design_wins() {
        // Both designs become satisfiable on the same arrival
        let mut engine = engine(&["AL1a1b2", "BL1b1a2"], ScanPolicy::ArrivedSpecies);

        arrive(&mut engine, "aL");
        let bouquet = arrive(&mut engine, "bL").unwrap();

        assert_eq!(bouquet.design, 'A');
    }

    #[test]
    fn test_registration_order_beats_fit() {
        // B would be an exact fit but A was registered first
        let mut engine = engine(&["AL1a3", "BL1a1"], ScanPolicy::ArrivedSpecies);

        arrive(&mut engine, "cL");
        arrive(&mut engine, "cL");
        let bouquet = arrive(&mut engine, "aL").unwrap();

        assert_eq!(bouquet.to_string(), "ALa1c2");
    }

    #[test]
    fn test_slack_from_first_seen_species() {
        let mut engine = engine(&["AL1a4"], ScanPolicy::ArrivedSpecies);

        for token in ["cL", "bL", "bL"] {
            assert_eq!(arrive(&mut engine, token), None);
        }
        let bouquet = arrive(&mut engine, "aL").unwrap();

        // Slack of 3: one c (first seen), then both b
        assert_eq!(bouquet.to_string(), "ALa1c1b2");
        assert!(engine.inventory(Size::Large).is_empty());
    }

    #[test]
    fn test_design_is_reused() {
        let mut engine = engine(&["AS1a1"], ScanPolicy::ArrivedSpecies);

        for _ in 0..3 {
            let bouquet = arrive(&mut engine, "aS").unwrap();
            assert_eq!(bouquet.to_string(), "ASa1");
        }
        assert_eq!(engine.running_total(Size::Small), 0);
    }

    #[test]
    fn test_arrived_species_scan_ignores_unrelated_designs() {
        // A needs one a and two more flowers of any species
        let mut engine = engine(&["AL1a3"], ScanPolicy::ArrivedSpecies);

        arrive(&mut engine, "aL");
        arrive(&mut engine, "bL");
        // Satisfiable now, but the arrival (b) is not required by A
        assert_eq!(arrive(&mut engine, "bL"), None);
        assert!(engine.find_satisfiable(Size::Large).is_some());

        // The next a arrival picks it up
        let bouquet = arrive(&mut engine, "aL").unwrap();
        assert_eq!(bouquet.to_string(), "ALa2b1");
        assert_eq!(engine.on_hand(Size::Large, sp('b')), 1);
    }

    #[test]
    fn test_all_designs_scan_matches_on_any_arrival() {
        let mut engine = engine(&["AL1a3"], ScanPolicy::AllDesigns);

        arrive(&mut engine, "aL");
        arrive(&mut engine, "bL");
        let bouquet = arrive(&mut engine, "bL").unwrap();

        assert_eq!(bouquet.to_string(), "ALa1b2");
        assert_eq!(engine.running_total(Size::Large), 0);
    }

    #[test]
    fn test_one_bouquet_per_arrival() {
        let mut engine = engine(&["AL1a1", "BL1b1"], ScanPolicy::AllDesigns);

        arrive(&mut engine, "bL");
        // b arrival already produced B; the a arrival produces A
        let bouquet = arrive(&mut engine, "aL").unwrap();
        assert_eq!(bouquet.design, 'A');
    }

    #[test]
    fn test_find_satisfiable_does_not_mutate() {
        let mut engine = engine(&["AL1a3"], ScanPolicy::ArrivedSpecies);
        for token in ["aL", "bL", "bL"] {
            arrive(&mut engine, token);
        }

        let before = engine.state_hash();
        for _ in 0..3 {
            assert_eq!(engine.find_satisfiable(Size::Large).map(Design::name), Some('A'));
        }
        assert_eq!(engine.state_hash(), before);
    }

    #[test]
    fn test_conservation_over_mixed_stream() {
        let mut engine = engine(
            &["AL2a1b5", "BL1c2", "CS3a3", "DS1a1b1c4"],
            ScanPolicy::ArrivedSpecies,
        );

        let tokens = [
            "aL", "bL", "cL", "aS", "aS", "bS", "cS", "aL", "aL", "cL", "cS", "dS", "aS", "bL",
        ];
        for token in tokens {
            arrive(&mut engine, token);
            assert_conserved(&engine);
        }
    }

    #[test]
    fn test_empty_catalog_only_stocks() {
        let mut engine = engine(&[], ScanPolicy::AllDesigns);

        assert_eq!(arrive(&mut engine, "aL"), None);
        assert_eq!(arrive(&mut engine, "aS"), None);
        assert_eq!(engine.running_total(Size::Large), 1);
        assert_eq!(engine.running_total(Size::Small), 1);
    }
}
