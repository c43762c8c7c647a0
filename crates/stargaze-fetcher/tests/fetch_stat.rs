//! Fetch, cache and fallback behavior against a mock upstream.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stargaze_core::StatOutcome;
use stargaze_fetcher::cache::ManualClock;

use common::{fetcher, fetcher_with_clock, mount_stars, source_section, ONE_HOUR, REPO_PATH};

#[tokio::test]
async fn parses_stargazers_count() {
    let server = MockServer::start().await;
    mount_stars(&server, 1234, 1).await;

    let f = fetcher(&server.uri());
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(1234));
}

#[tokio::test]
async fn second_call_within_window_is_served_from_cache() {
    let server = MockServer::start().await;
    mount_stars(&server, 42, 1).await;

    let clock = Arc::new(ManualClock::new());
    let f = fetcher_with_clock(&source_section(&server.uri()), Arc::clone(&clock));

    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(42));
    clock.advance(ONE_HOUR - Duration::from_secs(1));
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(42));

    assert_eq!(f.metrics().lookups.get(&[("outcome", "fetched")]), 1);
    assert_eq!(f.metrics().lookups.get(&[("outcome", "hit")]), 1);
}

#[tokio::test]
async fn call_after_window_fetches_again() {
    let server = MockServer::start().await;
    mount_stars(&server, 42, 2).await;

    let clock = Arc::new(ManualClock::new());
    let f = fetcher_with_clock(&source_section(&server.uri()), Arc::clone(&clock));

    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(42));
    clock.advance(ONE_HOUR);
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(42));
}

#[tokio::test]
async fn credential_attaches_bearer_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .and(header("authorization", "Bearer ghp_test"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "stargazers_count": 7 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let f = fetcher(&server.uri());
    assert_eq!(f.fetch_stat(Some("ghp_test")).await, StatOutcome::Known(7));
}

#[tokio::test]
async fn no_credential_omits_auth_headers_and_still_succeeds() {
    let server = MockServer::start().await;
    mount_stars(&server, 99, 1).await;

    let f = fetcher(&server.uri());
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(99));

    let reqs = server.received_requests().await.expect("recording enabled");
    assert_eq!(reqs.len(), 1);
    assert!(reqs[0].headers.get("authorization").is_none());
    assert!(reqs[0].headers.get("content-type").is_none());
    assert!(reqs[0].headers.get("user-agent").is_some());
}

#[tokio::test]
async fn server_error_returns_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let f = fetcher(&server.uri());
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Unknown);
    assert_eq!(f.metrics().failures.get(&[("kind", "status")]), 1);
}

#[tokio::test]
async fn malformed_body_returns_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let f = fetcher(&server.uri());
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Unknown);
    assert_eq!(f.metrics().failures.get(&[("kind", "parse")]), 1);
}

#[tokio::test]
async fn missing_count_field_returns_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "Not Found" })),
        )
        .mount(&server)
        .await;

    let f = fetcher(&server.uri());
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Unknown);
}

#[tokio::test]
async fn connection_refused_returns_unknown() {
    // grab a free port, then close it so nothing is listening
    let addr = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap()
    };

    let f = fetcher(&format!("http://{addr}"));
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Unknown);
    assert_eq!(f.metrics().failures.get(&[("kind", "network")]), 1);
}

#[tokio::test]
async fn slow_upstream_times_out_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "stargazers_count": 1 }))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let mut cfg = source_section(&server.uri());
    cfg.timeout_ms = 100;
    let f = fetcher_with_clock(&cfg, Arc::new(ManualClock::new()));

    assert_eq!(f.fetch_stat(None).await, StatOutcome::Unknown);
    assert_eq!(f.metrics().failures.get(&[("kind", "timeout")]), 1);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_stars(&server, 5, 1).await;

    let f = fetcher(&server.uri());
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Unknown);
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(5));
}

#[tokio::test]
async fn concurrent_misses_issue_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "stargazers_count": 321 }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let f = fetcher(&server.uri());
    let (a, b, c) = tokio::join!(f.fetch_stat(None), f.fetch_stat(None), f.fetch_stat(Some("tok")));
    assert_eq!(a, StatOutcome::Known(321));
    assert_eq!(b, StatOutcome::Known(321));
    assert_eq!(c, StatOutcome::Known(321));
}

#[tokio::test]
async fn concurrent_failing_misses_share_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(300)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_stars(&server, 8, 1).await;

    let f = fetcher(&server.uri());
    let started = std::time::Instant::now();
    let (a, b, c, d, e) = tokio::join!(
        f.fetch_stat(None),
        f.fetch_stat(None),
        f.fetch_stat(None),
        f.fetch_stat(None),
        f.fetch_stat(None)
    );
    let elapsed = started.elapsed();

    for outcome in [a, b, c, d, e] {
        assert_eq!(outcome, StatOutcome::Unknown);
    }
    // one shared upstream round trip, not five in a row
    assert!(elapsed < Duration::from_millis(900), "took {elapsed:?}");
    assert_eq!(f.metrics().lookups.get(&[("outcome", "failed")]), 1);
    assert_eq!(f.metrics().lookups.get(&[("outcome", "shared")]), 4);

    // the settled fetch leaves nothing behind; the next render tries again
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(8));
}

#[tokio::test]
async fn failure_after_window_returns_unknown_not_stale_count() {
    let server = MockServer::start().await;
    mount_stars(&server, 42, 1).await;

    let clock = Arc::new(ManualClock::new());
    let f = fetcher_with_clock(&source_section(&server.uri()), Arc::clone(&clock));
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Known(42));

    server.reset().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    clock.advance(ONE_HOUR);
    assert_eq!(f.fetch_stat(None).await, StatOutcome::Unknown);
}
