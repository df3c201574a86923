//! Order Cache Matching Algorithms
//!
//! Implementations of the matching port used by the order store.

mod cross_company;

pub use cross_company::CrossCompanyMatcher;

// Re-export the trait from ports for convenience
pub use ordercache_ports::{MatchCandidate, MatchingAlgorithm};
