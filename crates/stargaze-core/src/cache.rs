//! Cache contract for stat results.
//!
//! The fetcher only talks to `StatCache`; where entries live (process memory,
//! a shared store) is up to the implementation. Implementations must give
//! atomic read/check/write for a single key.

use std::time::{Duration, Instant};

/// A successful fetch result and its validity window.
/// Never mutated; a newer fetch replaces it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedStat {
    count: u64,
    stored_at: Instant,
    ttl: Duration,
}

impl CachedStat {
    pub fn new(count: u64, stored_at: Instant, ttl: Duration) -> Self {
        Self {
            count,
            stored_at,
            ttl,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn stored_at(&self) -> Instant {
        self.stored_at
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh iff `now < stored_at + ttl`.
    pub fn is_fresh(&self, now: Instant) -> bool {
        match self.stored_at.checked_add(self.ttl) {
            Some(expires_at) => now < expires_at,
            // ttl too large to represent: never expires
            None => true,
        }
    }
}

/// Time-windowed stat cache.
pub trait StatCache: Send + Sync {
    /// Live entry for `key`, or `None` on miss or expiry.
    fn get(&self, key: &str) -> Option<CachedStat>;

    /// Store `count` under `key` for `ttl`, replacing any prior entry.
    fn put(&self, key: &str, count: u64, ttl: Duration);
}
