//! Delay simulation for lull.
//!
//! This crate holds the async side of the workspace: a randomized-delay
//! [`Waiter`] and a [`Collector`] that runs many waiters and orders their
//! results. Domain types and validation live in `lull-types`.

mod collector;
pub mod errors;
mod waiter;

pub use collector::{Collector, wait_n};
pub use errors::CollectError;
pub use waiter::{DEFAULT_MAX_DELAY, Waiter, wait_random};
