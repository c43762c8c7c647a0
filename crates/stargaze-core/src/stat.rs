//! Stat query and outcome types.

use std::fmt;

use serde::Serialize;

/// Identifies the remote resource to read, plus an optional credential.
/// Built fresh for every fetch; never mutated.
#[derive(Clone)]
pub struct StatQuery {
    endpoint: String,
    credential: Option<String>,
}

impl StatQuery {
    /// Blank credentials are treated as absent; anything else is kept as given.
    pub fn new(endpoint: impl Into<String>, credential: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential: credential
                .filter(|c| !c.trim().is_empty())
                .map(str::to_owned),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Cache identity: the endpoint only. The credential never changes the
    /// answer and must not end up in cache keys.
    pub fn cache_key(&self) -> &str {
        &self.endpoint
    }
}

// Keep the credential out of logs.
impl fmt::Debug for StatQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatQuery")
            .field("endpoint", &self.endpoint)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of a stat fetch. `Unknown` is the sentinel returned on any
/// retrieval failure; callers never see an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "Option<u64>")]
pub enum StatOutcome {
    Known(u64),
    Unknown,
}

impl StatOutcome {
    pub fn count(self) -> Option<u64> {
        match self {
            StatOutcome::Known(n) => Some(n),
            StatOutcome::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, StatOutcome::Known(_))
    }
}

impl From<StatOutcome> for Option<u64> {
    fn from(o: StatOutcome) -> Self {
        o.count()
    }
}

impl From<Option<u64>> for StatOutcome {
    fn from(v: Option<u64>) -> Self {
        match v {
            Some(n) => StatOutcome::Known(n),
            None => StatOutcome::Unknown,
        }
    }
}
