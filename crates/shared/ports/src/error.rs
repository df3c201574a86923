use ordercache_core::OrderId;
use thiserror::Error;

/// Domain-level errors for store mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate order id: {0}")]
    DuplicateOrderId(OrderId),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
