//! Test utilities for the orders crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

mod clock;
mod orders;

pub use clock::MutableClock;
pub use orders::{InMemoryOrderRepository, RecordingNotifier, SequentialOrderIdGenerator};
