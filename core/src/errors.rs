//! Collector failures.

use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinError;

use lull_types::InvalidArgument;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// The deadline passed first; waiters still in flight were aborted.
    #[error("deadline of {deadline:?} elapsed after {completed} of {requested} delays")]
    DeadlineElapsed {
        deadline: Duration,
        completed: usize,
        requested: usize,
    },
    #[error("waiter task failed: {0}")]
    Join(#[from] JoinError),
}

impl CollectError {
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
