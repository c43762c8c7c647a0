//! Shared application state for the stargaze service.

use std::sync::Arc;

use stargaze_core::error::Result;
use stargaze_core::StatOutcome;

use crate::config::{HeroContent, StargazeConfig};
use crate::fetcher::StatFetcher;
use crate::obs::StatMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repo: String,
    repo_url: String,
    hero: HeroContent,
    credential: Option<String>,
    fetcher: StatFetcher,
    metrics: Arc<StatMetrics>,
}

impl AppState {
    /// Build state from config. `credential` is resolved by the caller
    /// (usually from the environment) and handed to every fetch.
    pub fn new(cfg: &StargazeConfig, credential: Option<String>) -> Result<Self> {
        let metrics = Arc::new(StatMetrics::default());
        let fetcher = StatFetcher::from_config(&cfg.source, Arc::clone(&metrics))?;
        Ok(Self::with_fetcher(cfg, credential, fetcher, metrics))
    }

    /// Build state around an already-wired fetcher.
    pub fn with_fetcher(
        cfg: &StargazeConfig,
        credential: Option<String>,
        fetcher: StatFetcher,
        metrics: Arc<StatMetrics>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repo: cfg.source.repo.clone(),
                repo_url: cfg.source.repo_url(),
                hero: cfg.hero.clone(),
                credential,
                fetcher,
                metrics,
            }),
        }
    }

    pub fn repo(&self) -> &str {
        &self.inner.repo
    }

    pub fn repo_url(&self) -> &str {
        &self.inner.repo_url
    }

    pub fn hero(&self) -> &HeroContent {
        &self.inner.hero
    }

    pub fn metrics(&self) -> &StatMetrics {
        &self.inner.metrics
    }

    pub async fn stars(&self) -> StatOutcome {
        self.inner
            .fetcher
            .fetch_stat(self.inner.credential.as_deref())
            .await
    }
}
