//! Shared fixtures for fetcher integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stargaze_fetcher::cache::{Clock, InMemoryStatCache, ManualClock};
use stargaze_fetcher::config::SourceSection;
use stargaze_fetcher::obs::StatMetrics;
use stargaze_fetcher::source::GithubStatSource;
use stargaze_fetcher::StatFetcher;

pub const REPO: &str = "acme/widgets";
pub const REPO_PATH: &str = "/repos/acme/widgets";

pub fn source_section(api_base: &str) -> SourceSection {
    SourceSection {
        api_base: api_base.to_string(),
        repo: REPO.to_string(),
        timeout_ms: 1000,
        ..SourceSection::default()
    }
}

/// Fetcher against `api_base` whose cache ages by `clock`.
pub fn fetcher_with_clock(cfg: &SourceSection, clock: Arc<ManualClock>) -> StatFetcher {
    let source = GithubStatSource::new(cfg).expect("client builds");
    let clock: Arc<dyn Clock> = clock;
    StatFetcher::new(
        cfg.endpoint(),
        cfg.revalidate(),
        Arc::new(source),
        Arc::new(InMemoryStatCache::with_clock(clock)),
        Arc::new(StatMetrics::default()),
    )
}

pub fn fetcher(api_base: &str) -> StatFetcher {
    fetcher_with_clock(&source_section(api_base), Arc::new(ManualClock::new()))
}

pub async fn mount_stars(server: &MockServer, count: u64, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "full_name": REPO,
            "stargazers_count": count
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub const ONE_HOUR: Duration = Duration::from_secs(3600);
