//! Stat fetcher: cache lookup, single outbound read on miss, fallback to
//! `StatOutcome::Unknown` on any retrieval failure.
//!
//! `fetch_stat` never returns an error. Concurrent misses on the same key are
//! coalesced: the first caller fetches, the rest wait on a per-key `watch`
//! channel and receive the same outcome, success or `Unknown`. A slow
//! upstream therefore costs every waiter one upstream round trip, not one each.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;

use stargaze_core::{StatCache, StatOutcome, StatQuery};

use crate::cache::InMemoryStatCache;
use crate::config::SourceSection;
use crate::obs::StatMetrics;
use crate::source::{GithubStatSource, StatSource};

pub struct StatFetcher {
    endpoint: String,
    ttl: Duration,
    source: Arc<dyn StatSource>,
    cache: Arc<dyn StatCache>,
    metrics: Arc<StatMetrics>,
    in_flight: DashMap<String, watch::Receiver<Option<StatOutcome>>>,
}

impl StatFetcher {
    pub fn new(
        endpoint: impl Into<String>,
        ttl: Duration,
        source: Arc<dyn StatSource>,
        cache: Arc<dyn StatCache>,
        metrics: Arc<StatMetrics>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            ttl,
            source,
            cache,
            metrics,
            in_flight: DashMap::new(),
        }
    }

    /// GitHub source + in-memory cache, wired from config.
    pub fn from_config(
        cfg: &SourceSection,
        metrics: Arc<StatMetrics>,
    ) -> stargaze_core::Result<Self> {
        let source = GithubStatSource::new(cfg)?;
        Ok(Self::new(
            cfg.endpoint(),
            cfg.revalidate(),
            Arc::new(source),
            Arc::new(InMemoryStatCache::new()),
            metrics,
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn metrics(&self) -> &StatMetrics {
        &self.metrics
    }

    /// Fetch the stat, attaching `credential` as a bearer token when given.
    pub async fn fetch_stat(&self, credential: Option<&str>) -> StatOutcome {
        let query = StatQuery::new(self.endpoint.as_str(), credential);
        let key = query.cache_key();

        if let Some(hit) = self.cache.get(key) {
            tracing::debug!(%key, count = hit.count(), "stat cache hit");
            self.metrics.lookups.inc(&[("outcome", "hit")]);
            return StatOutcome::Known(hit.count());
        }

        // entry guard must be released before any await
        let role = match self.in_flight.entry(key.to_string()) {
            Entry::Occupied(e) => Role::Waiter(e.get().clone()),
            Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None);
                e.insert(rx);
                Role::Leader(tx)
            }
        };

        match role {
            Role::Waiter(mut rx) => {
                self.metrics.lookups.inc(&[("outcome", "shared")]);
                tracing::debug!(%key, "stat fetch in flight, waiting on it");
                match rx.wait_for(Option::is_some).await {
                    Ok(v) => (*v).unwrap_or(StatOutcome::Unknown),
                    // leader dropped mid-fetch
                    Err(_) => StatOutcome::Unknown,
                }
            }
            Role::Leader(tx) => {
                let slot = InFlightSlot {
                    map: &self.in_flight,
                    key,
                };
                let outcome = self.lead(&query).await;
                // cache is filled before the slot is released, so later
                // callers hit it instead of starting a new fetch
                drop(slot);
                let _ = tx.send(Some(outcome));
                outcome
            }
        }
    }

    async fn lead(&self, query: &StatQuery) -> StatOutcome {
        let key = query.cache_key();

        // a previous leader may have finished between our miss and the claim
        if let Some(hit) = self.cache.get(key) {
            self.metrics.lookups.inc(&[("outcome", "hit")]);
            return StatOutcome::Known(hit.count());
        }

        tracing::debug!(%key, authed = query.credential().is_some(), "stat cache miss, fetching");
        let started = Instant::now();
        let res = self.source.fetch(query).await;
        let elapsed = started.elapsed();

        match res {
            Ok(count) => {
                self.metrics
                    .upstream_duration
                    .observe(&[("result", "ok")], elapsed);
                self.metrics.lookups.inc(&[("outcome", "fetched")]);
                self.cache.put(key, count, self.ttl);
                StatOutcome::Known(count)
            }
            Err(e) => {
                let kind = e.failure_kind().map(|k| k.as_str()).unwrap_or("internal");
                self.metrics
                    .upstream_duration
                    .observe(&[("result", "error")], elapsed);
                self.metrics.lookups.inc(&[("outcome", "failed")]);
                self.metrics.failures.inc(&[("kind", kind)]);
                tracing::warn!(%key, kind, error = %e, "stat fetch failed, returning unknown");
                StatOutcome::Unknown
            }
        }
    }
}

enum Role {
    Leader(watch::Sender<Option<StatOutcome>>),
    Waiter(watch::Receiver<Option<StatOutcome>>),
}

/// Removes the in-flight entry when the leader settles or is dropped.
struct InFlightSlot<'a> {
    map: &'a DashMap<String, watch::Receiver<Option<StatOutcome>>>,
    key: &'a str,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.map.remove(self.key);
    }
}
