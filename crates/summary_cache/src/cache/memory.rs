use dashmap::{mapref::entry::Entry, DashMap};

use crate::{cache::SummaryCache, CacheKey, SummaryResult};

/// Concurrent in-memory cache backed by a sharded map.
///
/// Reads and writes to different keys never contend on the same lock; two writers
/// racing on one key resolve to whichever inserted first, the loser is dropped.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: DashMap<CacheKey, SummaryResult>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SummaryCache for InMemoryCache {
    fn get(&self, key: &CacheKey) -> Option<SummaryResult> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: CacheKey, result: SummaryResult) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                tracing::debug!(key = %entry.key(), "Cache entry already present, keeping first write");
                false
            }
            Entry::Vacant(entry) => {
                tracing::debug!(key = %entry.key(), "Caching summary");
                entry.insert(result);
                true
            }
        }
    }
}
