//! Fetcher config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use stargaze_core::error::{Result, StargazeError};

pub use schema::{HeroContent, ServerSection, SourceSection, StargazeConfig};

pub fn load_from_file(path: &str) -> Result<StargazeConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| StargazeError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the built-in defaults.
pub fn load_or_default(path: &str) -> Result<StargazeConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            Ok(StargazeConfig::default())
        }
        Err(e) => Err(StargazeError::Internal(format!("read config failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<StargazeConfig> {
    let cfg: StargazeConfig = serde_yaml::from_str(s)
        .map_err(|e| StargazeError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
