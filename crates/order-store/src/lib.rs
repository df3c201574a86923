//! Order Cache Store
//!
//! In-memory order store reachable through three lookup paths.
//!
//! # Architecture
//!
//! - **Record table**: arena of orders keyed by a store-issued `OrderHandle`
//! - **Security index**: handles grouped by security id, ordered by id and
//!   by insertion inside each security
//! - **Identifier index**: order id to handle
//! - **User index**: handles grouped by owning user
//!
//! Matching-size queries build a candidate view of one security bucket, run
//! the configured `MatchingAlgorithm` over it and write the consumed
//! quantity back to the record table.
//!
//! `InMemoryOrderStore` is the single-owner store; `SharedOrderStore` wraps
//! it behind one `RwLock` for use from several threads.
//!
//! # Example
//!
//! ```
//! use ordercache_store::{InMemoryOrderStore, Order, OrderStore};
//!
//! let mut store = InMemoryOrderStore::new();
//! store.add_order(Order::buy("OrdId1", "SecId1", 1000, "User1", "CompanyA")).unwrap();
//! store.add_order(Order::sell("OrdId2", "SecId1", 500, "User2", "CompanyB")).unwrap();
//!
//! assert_eq!(store.matching_size_for_security("SecId1"), 500);
//! assert_eq!(store.cancel_orders_for_user("User1"), 1);
//! ```

pub mod config;
mod in_memory;
mod index;
mod shared;

pub use config::{
    ConfigError, DuplicatePolicy, MAX_INITIAL_CAPACITY, StoreConfig, load_config,
    load_config_from_str,
};
pub use in_memory::InMemoryOrderStore;
pub use shared::SharedOrderStore;

// Re-export the domain types and ports callers need alongside the store
pub use ordercache_core::{Order, OrderHandle, Quantity, Side};
pub use ordercache_matching::CrossCompanyMatcher;
pub use ordercache_ports::{
    IndexStats, MatchCandidate, MatchingAlgorithm, OrderStore, StoreError, StoreResult,
};
