use ordercache_core::{Order, Quantity};

use crate::error::StoreResult;

/// Entry counts of the record table and each index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Records in the record table
    pub records: usize,
    /// Non-empty security buckets
    pub securities: usize,
    /// Identifier index entries
    pub order_ids: usize,
    /// Non-empty user buckets
    pub users: usize,
}

/// Port for the multiply-indexed order store
///
/// Every method is one logical step: no caller can observe a record that
/// is present in one index and missing from another.
pub trait OrderStore {
    /// Insert a new order, applying the store's duplicate-id policy
    fn add_order(&mut self, order: Order) -> StoreResult<()>;

    /// Remove one order by id. Unknown ids are a no-op.
    fn cancel_order(&mut self, order_id: &str) -> Option<Order>;

    /// Remove every order owned by `user`, returning how many were removed
    fn cancel_orders_for_user(&mut self, user: &str) -> usize;

    /// Remove every order on `security_id` whose quantity is at least `min_qty`
    fn cancel_orders_for_security_with_min_qty(
        &mut self,
        security_id: &str,
        min_qty: Quantity,
    ) -> usize;

    /// Total crossable quantity for a security
    ///
    /// Consumes the matched quantity from the stored orders.
    fn matching_size_for_security(&mut self, security_id: &str) -> Quantity;

    /// Snapshot of every live order, ordered by security then insertion
    fn all_orders(&self) -> Vec<Order>;
}
