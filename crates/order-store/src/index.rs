//! Ordered bucket index shared by the security and user lookups

use ordercache_core::OrderHandle;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

/// Groups record handles by key
///
/// Keys iterate in ascending order. Inside a bucket handles iterate in
/// issue order, which is insertion order. Empty buckets are dropped so the
/// bucket count is always the number of keys with live records.
#[derive(Debug)]
pub(crate) struct BucketIndex<K: Ord> {
    buckets: BTreeMap<K, BTreeSet<OrderHandle>>,
}

impl<K: Ord> BucketIndex<K> {
    pub(crate) fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: K, handle: OrderHandle) {
        self.buckets.entry(key).or_default().insert(handle);
    }

    /// Remove one handle, dropping the bucket once it is empty
    pub(crate) fn remove<Q>(&mut self, key: &Q, handle: OrderHandle) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        let removed = bucket.remove(&handle);
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        removed
    }

    /// Detach a whole bucket
    pub(crate) fn take<Q>(&mut self, key: &Q) -> Option<BTreeSet<OrderHandle>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.buckets.remove(key)
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&BTreeSet<OrderHandle>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.buckets.get(key)
    }

    /// Handles of one bucket in insertion order
    pub(crate) fn handles<Q>(&self, key: &Q) -> impl Iterator<Item = OrderHandle> + '_
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.buckets.get(key).into_iter().flatten().copied()
    }

    /// Every handle, bucket by bucket in key order
    pub(crate) fn iter(&self) -> impl Iterator<Item = OrderHandle> + '_ {
        self.buckets.values().flatten().copied()
    }

    /// Number of non-empty buckets
    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
    }
}
