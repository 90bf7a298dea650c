//! Randomized-delay waiter.
//!
//! A waiter draws a delay uniformly from `[0, bound)`, suspends for that long,
//! and hands back the exact value it slept for.

use std::time::Duration;

use lull_types::{DEFAULT_TIME_UNIT, Delay, DelayBound, InvalidArgument};

/// Bound used by [`wait_random`] callers that have no preference.
pub const DEFAULT_MAX_DELAY: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waiter {
    bound: DelayBound,
    time_unit: Duration,
}

impl Waiter {
    #[must_use]
    pub fn new(bound: DelayBound) -> Self {
        Self {
            bound,
            time_unit: DEFAULT_TIME_UNIT,
        }
    }

    /// Wall-clock length of one delay unit.
    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    #[must_use]
    pub fn bound(&self) -> DelayBound {
        self.bound
    }

    #[must_use]
    pub fn time_unit(&self) -> Duration {
        self.time_unit
    }

    /// Draw a delay without waiting.
    #[must_use]
    pub fn sample(&self) -> Delay {
        self.bound.scale(rand::random::<f64>())
    }

    /// Sample, suspend for the sampled delay, then return that same delay.
    pub async fn wait(&self) -> Delay {
        let delay = self.sample();
        let sleep_for = delay.to_duration(self.time_unit);
        tracing::debug!(
            delay = %delay,
            bound = %self.bound,
            sleep_ms = sleep_for.as_millis(),
            "Suspending for sampled delay"
        );
        tokio::time::sleep(sleep_for).await;
        tracing::debug!(delay = %delay, "Resumed after delay");
        delay
    }
}

impl Default for Waiter {
    fn default() -> Self {
        Self::new(DelayBound::DEFAULT)
    }
}

/// Wait a random delay in `[0, max_delay)` seconds and return it.
///
/// Rejects a negative or non-finite `max_delay` before any time passes.
pub async fn wait_random(max_delay: f64) -> Result<Delay, InvalidArgument> {
    let bound = DelayBound::new(max_delay)?;
    Ok(Waiter::new(bound).wait().await)
}
