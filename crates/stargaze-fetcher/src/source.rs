//! Outbound stat sources.
//!
//! A source performs exactly one read per call and reports every way it can
//! fail as a `Retrieval` error. It never caches and never retries; both are
//! the fetcher's concern.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;

use stargaze_core::error::{FailureKind, Result, StargazeError};
use stargaze_core::StatQuery;

use crate::config::SourceSection;

#[async_trait]
pub trait StatSource: Send + Sync {
    async fn fetch(&self, query: &StatQuery) -> Result<u64>;
}

/// Subset of the GitHub repository payload we read.
#[derive(Debug, Deserialize)]
struct RepoStats {
    stargazers_count: u64,
}

/// GitHub REST source (`GET /repos/{owner}/{name}`).
pub struct GithubStatSource {
    client: Client,
}

impl GithubStatSource {
    pub fn new(cfg: &SourceSection) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.timeout())
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| StargazeError::Internal(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StatSource for GithubStatSource {
    async fn fetch(&self, query: &StatQuery) -> Result<u64> {
        let mut req = self.client.get(query.endpoint());
        if let Some(token) = query.credential() {
            req = req
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json");
        }

        let res = req.send().await.map_err(classify)?;

        let status = res.status();
        if !status.is_success() {
            return Err(StargazeError::retrieval(
                FailureKind::Status,
                format!("upstream answered {status}"),
            ));
        }

        let body = res.bytes().await.map_err(classify)?;
        let stats: RepoStats = serde_json::from_slice(&body)
            .map_err(|e| StargazeError::retrieval(FailureKind::Parse, e.to_string()))?;
        Ok(stats.stargazers_count)
    }
}

fn classify(e: reqwest::Error) -> StargazeError {
    let kind = if e.is_timeout() {
        FailureKind::Timeout
    } else if e.is_decode() {
        FailureKind::Parse
    } else {
        FailureKind::Network
    };
    // endpoint is logged by the fetcher
    StargazeError::retrieval(kind, e.without_url().to_string())
}
