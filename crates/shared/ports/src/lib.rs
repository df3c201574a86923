//! Order Cache Ports
//!
//! Port definitions (traits) for the order cache.
//! These define the boundaries between the store and the algorithms it runs.

mod error;
mod matching;
mod store;

pub use error::{StoreError, StoreResult};
pub use matching::{MatchCandidate, MatchingAlgorithm};
pub use store::{IndexStats, OrderStore};
