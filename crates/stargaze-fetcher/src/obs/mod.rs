//! Lightweight in-process metrics for stat fetches.
//!
//! Counters and a latency histogram stored as atomics, rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::StatMetrics;
