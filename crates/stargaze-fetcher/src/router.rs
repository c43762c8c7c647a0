//! Axum router wiring.
//!
//! - `/`          hero section (waits for the stat fetch to settle)
//! - `/v1/stars`  raw stat as JSON, `null` when unknown
//! - `/metrics`   fetch counters and upstream latency
//! - `/healthz`   liveness

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use stargaze_core::StatOutcome;

use crate::{app_state::AppState, render};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hero))
        .route("/v1/stars", get(stars))
        .route("/metrics", get(metrics))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct StarsBody {
    pub repo: String,
    pub stars: StatOutcome,
}

async fn hero(State(state): State<AppState>) -> Html<String> {
    let stars = state.stars().await;
    Html(render::render_hero(state.hero(), stars, state.repo_url()))
}

async fn stars(State(state): State<AppState>) -> Json<StarsBody> {
    let stars = state.stars().await;
    Json(StarsBody {
        repo: state.repo().to_string(),
        stars,
    })
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics().render(),
    )
}

async fn healthz() -> &'static str {
    "ok"
}
