use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use stargaze_core::cache::{CachedStat, StatCache};

use super::clock::{Clock, SystemClock};

/// `DashMap`-backed stat cache. Expired entries are evicted on read.
pub struct InMemoryStatCache {
    entries: DashMap<String, CachedStat>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStatCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryStatCache {
    fn default() -> Self {
        Self::new()
    }
}

impl StatCache for InMemoryStatCache {
    fn get(&self, key: &str) -> Option<CachedStat> {
        let now = self.clock.now();
        // remove_if holds the shard lock across check + remove
        if self
            .entries
            .remove_if(key, |_, entry| !entry.is_fresh(now))
            .is_some()
        {
            tracing::debug!(%key, "stat cache entry expired");
            return None;
        }
        self.entries.get(key).map(|e| *e.value())
    }

    fn put(&self, key: &str, count: u64, ttl: Duration) {
        let entry = CachedStat::new(count, self.clock.now(), ttl);
        self.entries.insert(key.to_string(), entry);
    }
}
