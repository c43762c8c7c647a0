//! Stargaze service
//!
//! Serves the landing-page hero fragment with a cached GitHub star count.
//! - Config: $STARGAZE_CONFIG (default `stargaze.yaml`, defaults if missing)
//! - Credential: env var named by `source.credential_env`, optional

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use stargaze_core::error::{Result, StargazeError};
use stargaze_fetcher::{app_state, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "stargaze exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("STARGAZE_CONFIG").unwrap_or_else(|_| "stargaze.yaml".into());
    let cfg = config::load_or_default(&path)?;

    let listen: SocketAddr = cfg.server.listen.parse().map_err(|e| {
        StargazeError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
    })?;

    let credential = std::env::var(&cfg.source.credential_env)
        .ok()
        .filter(|v| !v.trim().is_empty());
    if credential.is_none() {
        tracing::info!(var = %cfg.source.credential_env, "no credential configured, using unauthenticated requests");
    }

    let state = app_state::AppState::new(&cfg, credential)?;
    let app = router::build_router(state);

    tracing::info!(%listen, repo = %cfg.source.repo, "stargaze starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| StargazeError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| StargazeError::Internal(format!("server failed: {e}")))
}
