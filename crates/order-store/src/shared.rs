use ordercache_core::{Order, Quantity};
use ordercache_ports::{IndexStats, MatchingAlgorithm, OrderStore, StoreResult};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::in_memory::InMemoryOrderStore;

/// Thread-safe order store handle
///
/// One lock guards the record table and all three indices together. Every
/// mutation, matching included, holds the write lock for the whole logical
/// operation; reads share the read lock. Clones share the same store.
#[derive(Clone, Default)]
pub struct SharedOrderStore {
    inner: Arc<RwLock<InMemoryOrderStore>>,
}

impl SharedOrderStore {
    pub fn new() -> Self {
        Self::from_store(InMemoryOrderStore::new())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::from_store(InMemoryOrderStore::with_config(config))
    }

    pub fn with_matcher(config: StoreConfig, matcher: Box<dyn MatchingAlgorithm>) -> Self {
        Self::from_store(InMemoryOrderStore::with_matcher(config, matcher))
    }

    pub fn from_store(store: InMemoryOrderStore) -> Self {
        SharedOrderStore {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn add_order(&self, order: Order) -> StoreResult<()> {
        self.inner.write().add_order(order)
    }

    pub fn cancel_order(&self, order_id: &str) -> Option<Order> {
        self.inner.write().cancel_order(order_id)
    }

    pub fn cancel_orders_for_user(&self, user: &str) -> usize {
        self.inner.write().cancel_orders_for_user(user)
    }

    pub fn cancel_orders_for_security_with_min_qty(
        &self,
        security_id: &str,
        min_qty: Quantity,
    ) -> usize {
        self.inner
            .write()
            .cancel_orders_for_security_with_min_qty(security_id, min_qty)
    }

    /// Takes the write lock: matching consumes quantity
    pub fn matching_size_for_security(&self, security_id: &str) -> Quantity {
        self.inner.write().matching_size_for_security(security_id)
    }

    pub fn all_orders(&self) -> Vec<Order> {
        self.inner.read().all_orders()
    }

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.inner.read().get_order(order_id)
    }

    pub fn orders_for_user(&self, user: &str) -> Vec<Order> {
        self.inner.read().orders_for_user(user)
    }

    pub fn orders_for_security(&self, security_id: &str) -> Vec<Order> {
        self.inner.read().orders_for_security(security_id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn index_stats(&self) -> IndexStats {
        self.inner.read().index_stats()
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Run several reads against one consistent view
    pub fn read<R>(&self, f: impl FnOnce(&InMemoryOrderStore) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run several mutations as one critical section
    pub fn write<R>(&self, f: impl FnOnce(&mut InMemoryOrderStore) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl OrderStore for SharedOrderStore {
    fn add_order(&mut self, order: Order) -> StoreResult<()> {
        self.inner.write().add_order(order)
    }

    fn cancel_order(&mut self, order_id: &str) -> Option<Order> {
        self.inner.write().cancel_order(order_id)
    }

    fn cancel_orders_for_user(&mut self, user: &str) -> usize {
        self.inner.write().cancel_orders_for_user(user)
    }

    fn cancel_orders_for_security_with_min_qty(
        &mut self,
        security_id: &str,
        min_qty: Quantity,
    ) -> usize {
        self.inner
            .write()
            .cancel_orders_for_security_with_min_qty(security_id, min_qty)
    }

    fn matching_size_for_security(&mut self, security_id: &str) -> Quantity {
        self.inner.write().matching_size_for_security(security_id)
    }

    fn all_orders(&self) -> Vec<Order> {
        self.inner.read().all_orders()
    }
}
