use serde::{Deserialize, Serialize};
use std::fmt;

/// Order quantity in whole units
pub type Quantity = u64;

/// Caller-assigned, globally unique order identifier
pub type OrderId = String;

/// Identifier of the traded security
pub type SecurityId = String;

/// Owning user of an order
pub type UserId = String;

/// Company the owning user trades for
pub type CompanyId = String;

/// Store-issued handle of one record
///
/// Handles are issued from a monotonically increasing counter and never
/// reused by the issuing store, so ordering handles orders records by
/// insertion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderHandle(u64);

impl OrderHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The handle issued right after this one
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
