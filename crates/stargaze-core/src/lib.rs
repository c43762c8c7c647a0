//! Stargaze core: transport-agnostic stat types, the cache contract, and the
//! shared error surface.
//!
//! This crate defines what a stat query is, what the fetcher may answer, and
//! how cached answers age. It carries no HTTP or runtime dependencies so the
//! fetcher and any alternative cache backend can share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `StargazeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cache;
pub mod error;
pub mod format;
pub mod stat;

/// Shared result type.
pub use error::{FailureKind, Result, StargazeError};
pub use cache::{CachedStat, StatCache};
pub use format::format_compact;
pub use stat::{StatOutcome, StatQuery};
