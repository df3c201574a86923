//! Order Cache Core Domain
//!
//! Pure domain types for the order cache.
//! This crate contains no locking, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Order, ParseSideError, Side};
pub use values::{CompanyId, OrderHandle, OrderId, Quantity, SecurityId, UserId};
