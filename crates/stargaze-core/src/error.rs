//! Shared error type across stargaze crates.

use thiserror::Error;

/// How an outbound stat fetch failed (stable labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Connection refused, DNS failure, reset, TLS error.
    Network,
    /// Request did not complete within the configured timeout.
    Timeout,
    /// Upstream answered with a non-success status.
    Status,
    /// Body was not JSON or lacked the count field.
    Parse,
}

impl FailureKind {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Timeout => "timeout",
            FailureKind::Status => "status",
            FailureKind::Parse => "parse",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, StargazeError>;

/// Unified error type used by core and fetcher.
#[derive(Debug, Error)]
pub enum StargazeError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("retrieval failed ({}): {detail}", .kind.as_str())]
    Retrieval { kind: FailureKind, detail: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl StargazeError {
    pub fn retrieval(kind: FailureKind, detail: impl Into<String>) -> Self {
        StargazeError::Retrieval {
            kind,
            detail: detail.into(),
        }
    }

    /// Failure kind when this is a retrieval failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            StargazeError::Retrieval { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
