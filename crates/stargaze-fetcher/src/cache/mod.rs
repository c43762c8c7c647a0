//! In-process stat cache and the clock it ages entries by.

pub mod clock;
pub mod memory;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use memory::InMemoryStatCache;
