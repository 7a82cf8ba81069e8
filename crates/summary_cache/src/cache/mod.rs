use std::sync::Arc;

use crate::{CacheKey, SummaryResult};

pub mod memory;

pub trait SummaryCache {
    fn get(&self, key: &CacheKey) -> Option<SummaryResult>;

    /// Stores `result` under `key` unless an entry already exists.
    /// Returns `true` when this call created the entry.
    fn put(&self, key: CacheKey, result: SummaryResult) -> bool;
}

impl<T: SummaryCache + Send + Sync> SummaryCache for &T {
    fn get(&self, key: &CacheKey) -> Option<SummaryResult> {
        (**self).get(key)
    }

    fn put(&self, key: CacheKey, result: SummaryResult) -> bool {
        (**self).put(key, result)
    }
}

impl<T: SummaryCache + Send + Sync> SummaryCache for Arc<T> {
    fn get(&self, key: &CacheKey) -> Option<SummaryResult> {
        (**self).get(key)
    }

    fn put(&self, key: CacheKey, result: SummaryResult) -> bool {
        (**self).put(key, result)
    }
}
