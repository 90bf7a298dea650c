//! Resolved collector settings shared across crates.
//!
//! Raw TOML and CLI flags stay in `lull-config`; the loader resolves them into
//! these types at the parse boundary. Existence of a value is the proof of its
//! validity.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::{DelayBound, DelayCount};

/// Wall-clock length of one delay unit unless configured otherwise.
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

/// Whether waiter suspensions overlap or run back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectStrategy {
    /// All waiters are in flight at once; elapsed time tracks the longest delay.
    #[default]
    Concurrent,
    /// Each waiter finishes before the next starts; elapsed time tracks the sum.
    Sequential,
}

impl CollectStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CollectStrategy::Concurrent => "concurrent",
            CollectStrategy::Sequential => "sequential",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concurrent" => Some(CollectStrategy::Concurrent),
            "sequential" => Some(CollectStrategy::Sequential),
            _ => None,
        }
    }
}

impl fmt::Display for CollectStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown collect strategy `{0}` (expected `concurrent` or `sequential`)")]
pub struct UnknownStrategyError(String);

impl FromStr for CollectStrategy {
    type Err = UnknownStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownStrategyError(s.to_string()))
    }
}

/// Validated inputs for one collector run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectorSettings {
    bound: DelayBound,
    count: DelayCount,
    strategy: CollectStrategy,
    time_unit: Duration,
    deadline: Option<Duration>,
}

impl CollectorSettings {
    #[must_use]
    pub fn new(bound: DelayBound, count: DelayCount) -> Self {
        Self {
            bound,
            count,
            strategy: CollectStrategy::default(),
            time_unit: DEFAULT_TIME_UNIT,
            deadline: None,
        }
    }

    pub fn with_strategy(mut self, strategy: CollectStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn bound(&self) -> DelayBound {
        self.bound
    }

    #[must_use]
    pub fn count(&self) -> DelayCount {
        self.count
    }

    #[must_use]
    pub fn strategy(&self) -> CollectStrategy {
        self.strategy
    }

    #[must_use]
    pub fn time_unit(&self) -> Duration {
        self.time_unit
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}
