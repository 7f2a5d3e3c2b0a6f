//! Location Finder - placement matching for vending machine sales
//!
//! This library scores facility archetypes (hospitals, transit centers,
//! warehouses, ...) against the site criteria a prospect selects and ranks
//! them best match first. It also carries the HTTP surface, the in-memory
//! session store and the audit trail used by the service binary.

pub mod catalog;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use self::core::{rank, score, FinderPhase, FinderSession, LocationFinder};
pub use models::{Criterion, LocationArchetype, ScoredArchetype, ScoringWeights, SelectionState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let catalog = Catalog::builtin().expect("builtin catalog");
        let selected: SelectionState = ["high-traffic"].into_iter().collect();
        assert!(!rank(catalog.locations(), &selected).is_empty());
    }
}
