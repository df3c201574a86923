use log::{debug, info, warn};
use ordercache_core::{Order, OrderHandle, OrderId, Quantity, SecurityId, UserId};
use ordercache_matching::CrossCompanyMatcher;
use ordercache_ports::{
    IndexStats, MatchCandidate, MatchingAlgorithm, OrderStore, StoreError, StoreResult,
};
use std::collections::HashMap;
use std::fmt;

use crate::config::{DuplicatePolicy, MAX_INITIAL_CAPACITY, StoreConfig};
use crate::index::BucketIndex;

/// Single-owner order store
///
/// Records live in an arena keyed by `OrderHandle`. The security, identifier
/// and user indices hold handles only, and every record is removed from all
/// of them through `remove_record`, so no index can outlive its record.
pub struct InMemoryOrderStore {
    config: StoreConfig,
    matcher: Box<dyn MatchingAlgorithm>,
    next_handle: OrderHandle,
    records: HashMap<OrderHandle, Order>,
    by_security: BucketIndex<SecurityId>,
    by_order_id: HashMap<OrderId, OrderHandle>,
    by_user: BucketIndex<UserId>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_matcher(config, Box::new(CrossCompanyMatcher::new()))
    }

    /// Create a store that runs `matcher` for matching-size queries
    pub fn with_matcher(config: StoreConfig, matcher: Box<dyn MatchingAlgorithm>) -> Self {
        info!(
            "Order store created (duplicate policy: {:?}, matcher: {})",
            config.duplicate_policy,
            matcher.name()
        );

        // Configs built in code skip validation
        let capacity = config.initial_capacity.min(MAX_INITIAL_CAPACITY);
        Self {
            records: HashMap::with_capacity(capacity),
            by_order_id: HashMap::with_capacity(capacity),
            by_security: BucketIndex::new(),
            by_user: BucketIndex::new(),
            next_handle: OrderHandle::new(0),
            matcher,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        let handle = self.by_order_id.get(order_id)?;
        self.records.get(handle).cloned()
    }

    /// Orders owned by `user`, in insertion order
    pub fn orders_for_user(&self, user: &str) -> Vec<Order> {
        self.collect(self.by_user.handles(user))
    }

    /// Orders on `security_id`, in insertion order
    pub fn orders_for_security(&self, security_id: &str) -> Vec<Order> {
        self.collect(self.by_security.handles(security_id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn index_stats(&self) -> IndexStats {
        IndexStats {
            records: self.records.len(),
            securities: self.by_security.len(),
            order_ids: self.by_order_id.len(),
            users: self.by_user.len(),
        }
    }

    /// Drop every record and index entry
    pub fn clear(&mut self) {
        let dropped = self.records.len();
        self.records.clear();
        self.by_security.clear();
        self.by_order_id.clear();
        self.by_user.clear();
        debug!("Cleared {} orders", dropped);
    }

    fn collect(&self, handles: impl Iterator<Item = OrderHandle>) -> Vec<Order> {
        handles
            .filter_map(|handle| self.records.get(&handle).cloned())
            .collect()
    }

    fn issue_handle(&mut self) -> OrderHandle {
        let handle = self.next_handle;
        self.next_handle = handle.next();
        handle
    }

    /// Remove a record from the arena and from all three indices
    fn remove_record(&mut self, handle: OrderHandle) -> Option<Order> {
        let order = self.records.remove(&handle)?;
        self.by_security.remove(order.security_id(), handle);
        self.by_user.remove(order.user(), handle);
        self.by_order_id.remove(order.order_id());
        Some(order)
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryOrderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryOrderStore")
            .field("config", &self.config)
            .field("matcher", &self.matcher.name())
            .field("stats", &self.index_stats())
            .finish()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn add_order(&mut self, order: Order) -> StoreResult<()> {
        if let Some(&existing) = self.by_order_id.get(order.order_id()) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    warn!("Rejected duplicate order id {}", order.order_id());
                    return Err(StoreError::DuplicateOrderId(order.order_id().to_string()));
                }
                DuplicatePolicy::Replace => {
                    debug!("Replacing live order {}", order.order_id());
                    self.remove_record(existing);
                }
            }
        }

        let handle = self.issue_handle();
        debug!(
            "Adding order {} ({} {} x{}) as {}",
            order.order_id(),
            order.side(),
            order.security_id(),
            order.quantity(),
            handle
        );

        self.by_security
            .insert(order.security_id().to_string(), handle);
        self.by_user.insert(order.user().to_string(), handle);
        self.by_order_id.insert(order.order_id().to_string(), handle);
        self.records.insert(handle, order);
        Ok(())
    }

    fn cancel_order(&mut self, order_id: &str) -> Option<Order> {
        let handle = *self.by_order_id.get(order_id)?;
        let removed = self.remove_record(handle);
        debug!("Cancelled order {}", order_id);
        removed
    }

    fn cancel_orders_for_user(&mut self, user: &str) -> usize {
        // Detaching the bucket first fixes the member list before any index changes
        let Some(handles) = self.by_user.take(user) else {
            return 0;
        };

        let removed = handles
            .into_iter()
            .filter_map(|handle| self.remove_record(handle))
            .count();
        debug!("Cancelled {} orders for user {}", removed, user);
        removed
    }

    fn cancel_orders_for_security_with_min_qty(
        &mut self,
        security_id: &str,
        min_qty: Quantity,
    ) -> usize {
        let doomed: Vec<OrderHandle> = self
            .by_security
            .handles(security_id)
            .filter(|handle| {
                self.records
                    .get(handle)
                    .is_some_and(|order| order.quantity() >= min_qty)
            })
            .collect();

        for &handle in &doomed {
            self.remove_record(handle);
        }

        debug!(
            "Cancelled {} orders on {} with quantity >= {}",
            doomed.len(),
            security_id,
            min_qty
        );
        doomed.len()
    }

    fn matching_size_for_security(&mut self, security_id: &str) -> Quantity {
        let Some(bucket) = self.by_security.get(security_id) else {
            return 0;
        };

        let (total, fills) = {
            let mut candidates: Vec<MatchCandidate<'_>> = bucket
                .iter()
                .filter_map(|&handle| {
                    self.records
                        .get(&handle)
                        .map(|order| MatchCandidate::from_order(handle, order))
                })
                .collect();
            let before: Vec<Quantity> = candidates.iter().map(|c| c.quantity).collect();

            let total = self.matcher.match_candidates(&mut candidates);

            let fills: Vec<(OrderHandle, Quantity)> = candidates
                .iter()
                .zip(before)
                .filter(|(candidate, was)| candidate.quantity < *was)
                .map(|(candidate, was)| (candidate.handle, was - candidate.quantity))
                .collect();
            (total, fills)
        };

        // Matching consumes the crossed quantity from the live orders
        for (handle, consumed) in &fills {
            if let Some(order) = self.records.get_mut(handle) {
                order.reduce_quantity(*consumed);
            }
        }

        debug!(
            "Matched {} on {} using {} ({} orders touched)",
            total,
            security_id,
            self.matcher.name(),
            fills.len()
        );
        total
    }

    fn all_orders(&self) -> Vec<Order> {
        self.collect(self.by_security.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_book() -> Vec<Order> {
        vec![
            Order::buy("OrdId1", "SecId1", 1000, "User1", "CompanyA"),
            Order::sell("OrdId2", "SecId2", 3000, "User2", "CompanyB"),
            Order::sell("OrdId3", "SecId1", 500, "User3", "CompanyA"),
            Order::buy("OrdId4", "SecId2", 600, "User4", "CompanyC"),
            Order::buy("OrdId5", "SecId2", 100, "User5", "CompanyB"),
            Order::buy("OrdId6", "SecId3", 1000, "User6", "CompanyD"),
            Order::buy("OrdId7", "SecId2", 2000, "User7", "CompanyE"),
            Order::sell("OrdId8", "SecId2", 5000, "User8", "CompanyE"),
        ]
    }

    fn store_with(orders: Vec<Order>) -> InMemoryOrderStore {
        let mut store = InMemoryOrderStore::new();
        for order in orders {
            store.add_order(order).unwrap();
        }
        store
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.order_id()).collect()
    }

    #[test]
    fn test_all_orders_follow_security_then_insertion_order() {
        let store = store_with(reference_book());
        let all = store.all_orders();

        assert_eq!(all.len(), 8);
        assert_eq!(
            ids(&all),
            vec![
                "OrdId1", "OrdId3", "OrdId2", "OrdId4", "OrdId5", "OrdId7", "OrdId8", "OrdId6"
            ]
        );
    }

    #[test]
    fn test_index_stats_track_every_index() {
        let mut store = store_with(reference_book());
        assert_eq!(
            store.index_stats(),
            IndexStats {
                records: 8,
                securities: 3,
                order_ids: 8,
                users: 8,
            }
        );

        store.cancel_order("OrdId6");
        assert_eq!(
            store.index_stats(),
            IndexStats {
                records: 7,
                securities: 2,
                order_ids: 7,
                users: 7,
            }
        );
    }

    #[test]
    fn test_cancel_order_removes_from_every_index() {
        let mut store = store_with(vec![
            Order::buy("OrdId1", "SecId1", 100, "User1", "Company1"),
            Order::sell("OrdId2", "SecId1", 200, "User1", "Company1"),
        ]);

        let removed = store.cancel_order("OrdId1").unwrap();
        assert_eq!(removed.order_id(), "OrdId1");
        assert!(store.get_order("OrdId1").is_none());
        assert_eq!(ids(&store.orders_for_user("User1")), vec!["OrdId2"]);
        assert_eq!(ids(&store.orders_for_security("SecId1")), vec!["OrdId2"]);

        assert!(store.cancel_order("OrdId1").is_none());
        assert!(store.cancel_order("NonExistentOrder").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_id_is_rejected_by_default() {
        let mut store = InMemoryOrderStore::new();
        store
            .add_order(Order::buy("OrdId1", "SecId1", 100, "User1", "Company1"))
            .unwrap();

        let err = store
            .add_order(Order::sell("OrdId1", "SecId2", 900, "User2", "Company2"))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateOrderId("OrdId1".to_string()));

        let live = store.get_order("OrdId1").unwrap();
        assert_eq!(live.security_id(), "SecId1");
        assert_eq!(live.quantity(), 100);
        assert!(store.orders_for_user("User2").is_empty());
        assert_eq!(store.index_stats().records, 1);
    }

    #[test]
    fn test_duplicate_id_replaces_under_replace_policy() {
        let config = StoreConfig::default().with_duplicate_policy(DuplicatePolicy::Replace);
        let mut store = InMemoryOrderStore::with_config(config);
        store
            .add_order(Order::buy("OrdId1", "SecId1", 100, "User1", "Company1"))
            .unwrap();
        store
            .add_order(Order::buy("OrdId2", "SecId1", 300, "User3", "Company3"))
            .unwrap();

        store
            .add_order(Order::sell("OrdId1", "SecId1", 900, "User2", "Company2"))
            .unwrap();

        let live = store.get_order("OrdId1").unwrap();
        assert_eq!(live.quantity(), 900);
        assert_eq!(live.user(), "User2");
        assert!(store.orders_for_user("User1").is_empty());
        // The replacement goes to the back of its security bucket
        assert_eq!(
            ids(&store.orders_for_security("SecId1")),
            vec!["OrdId2", "OrdId1"]
        );
        assert_eq!(
            store.index_stats(),
            IndexStats {
                records: 2,
                securities: 1,
                order_ids: 2,
                users: 2,
            }
        );
    }

    #[test]
    fn test_matching_reference_book() {
        let mut store = store_with(reference_book());

        assert_eq!(store.matching_size_for_security("SecId1"), 0);
        assert_eq!(store.matching_size_for_security("SecId2"), 2700);
        assert_eq!(store.matching_size_for_security("SecId3"), 0);
        assert_eq!(store.matching_size_for_security("Unknown"), 0);
    }

    #[test]
    fn test_matching_consumes_quantities_but_keeps_orders() {
        let mut store = store_with(reference_book());

        assert_eq!(store.matching_size_for_security("SecId2"), 2700);

        assert_eq!(store.get_order("OrdId2").unwrap().quantity(), 400);
        assert_eq!(store.get_order("OrdId4").unwrap().quantity(), 0);
        assert_eq!(store.get_order("OrdId5").unwrap().quantity(), 0);
        assert_eq!(store.get_order("OrdId7").unwrap().quantity(), 0);
        assert_eq!(store.get_order("OrdId8").unwrap().quantity(), 4900);
        assert_eq!(store.len(), 8);

        // Only same-company pairs are left with quantity
        assert_eq!(store.matching_size_for_security("SecId2"), 0);

        // Exhausted orders are still cancelable
        assert!(store.cancel_order("OrdId4").is_some());
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn test_min_qty_cancellation_keeps_smaller_orders() {
        let mut store = store_with(vec![
            Order::buy("1", "SecId1", 200, "User1", "Company1"),
            Order::sell("2", "SecId1", 500, "User2", "Company1"),
            Order::buy("3", "SecId1", 300, "User3", "Company2"),
            Order::buy("4", "SecId2", 900, "User1", "Company1"),
        ]);

        assert_eq!(store.cancel_orders_for_security_with_min_qty("SecId1", 300), 2);

        assert_eq!(ids(&store.orders_for_security("SecId1")), vec!["1"]);
        assert_eq!(ids(&store.orders_for_user("User1")), vec!["1", "4"]);
        assert!(store.orders_for_user("User2").is_empty());
        assert_eq!(store.cancel_orders_for_security_with_min_qty("SecId9", 0), 0);
    }

    #[test]
    fn test_cancel_for_user_spans_securities() {
        let mut store = store_with(vec![
            Order::buy("1", "SecId1", 200, "User1", "Company1"),
            Order::sell("2", "SecId2", 300, "User1", "Company1"),
            Order::buy("3", "SecId3", 400, "User2", "Company2"),
        ]);

        assert_eq!(store.cancel_orders_for_user("User1"), 2);
        assert_eq!(ids(&store.all_orders()), vec!["3"]);
        assert_eq!(store.index_stats().securities, 1);

        assert_eq!(store.cancel_orders_for_user("User3"), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_oversized_capacity_is_clamped() {
        let config = StoreConfig::default()
            .with_initial_capacity(usize::MAX)
            .with_duplicate_policy(DuplicatePolicy::Replace);
        let mut store = InMemoryOrderStore::with_config(config);

        assert_eq!(store.config().initial_capacity, usize::MAX);
        assert_eq!(store.config().duplicate_policy, DuplicatePolicy::Replace);
        store
            .add_order(Order::buy("OrdId1", "SecId1", 10, "User1", "CompanyA"))
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_empties_every_index() {
        let mut store = store_with(reference_book());
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.index_stats(), IndexStats::default());
        assert!(store.all_orders().is_empty());

        // Ids become reusable after a clear
        store
            .add_order(Order::buy("OrdId1", "SecId1", 10, "User1", "CompanyA"))
            .unwrap();
        assert_eq!(store.len(), 1);
    }
}
