//! Top-level facade crate for stargaze.
//!
//! Re-exports core types and the fetcher library so users can depend on a single crate.

pub mod core {
    pub use stargaze_core::*;
}

pub mod fetcher {
    pub use stargaze_fetcher::*;
}
