//! Stargaze fetcher library entry.
//!
//! Wires config, the GitHub stat source, the in-memory cache, and the fetch
//! fallback logic into a small HTTP service. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod obs;
pub mod render;
pub mod router;
pub mod source;

pub use fetcher::StatFetcher;
