//! Ordered delay collector.
//!
//! Runs a waiter `n` times and returns the sampled delays in ascending order.
//!
//! # Strategies
//!
//! - `Concurrent`: every waiter is spawned onto a [`JoinSet`] up front, so all
//!   suspensions overlap and the run takes roughly as long as the largest delay.
//! - `Sequential`: each waiter is awaited before the next starts; the run takes
//!   roughly the sum of the delays.
//!
//! An optional deadline bounds the whole run. When it passes, outstanding
//! waiters are aborted and the caller gets [`CollectError::DeadlineElapsed`].

use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};

use lull_types::{CollectStrategy, CollectorSettings, Delay, DelayBound, DelayCount};

use crate::errors::CollectError;
use crate::waiter::Waiter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collector {
    waiter: Waiter,
    strategy: CollectStrategy,
    deadline: Option<Duration>,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    limit: Duration,
    at: Instant,
}

impl Collector {
    #[must_use]
    pub fn new(waiter: Waiter) -> Self {
        Self {
            waiter,
            strategy: CollectStrategy::default(),
            deadline: None,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &CollectorSettings) -> Self {
        let waiter = Waiter::new(settings.bound()).with_time_unit(settings.time_unit());
        Self::new(waiter)
            .with_strategy(settings.strategy())
            .with_deadline(settings.deadline())
    }

    pub fn with_strategy(mut self, strategy: CollectStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    #[must_use]
    pub fn strategy(&self) -> CollectStrategy {
        self.strategy
    }

    /// Run `n` waiters and return their delays sorted ascending.
    ///
    /// Fails with `InvalidArgument::CountTooLarge` before any waiter starts
    /// when `n` exceeds [`DelayCount::MAX`].
    pub async fn collect(&self, n: usize) -> Result<Vec<Delay>, CollectError> {
        let n = DelayCount::try_from(n)?.get();
        if n == 0 {
            tracing::debug!("Nothing to collect");
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let deadline = self.deadline.map(|limit| Deadline {
            limit,
            at: started + limit,
        });

        tracing::debug!(
            count = n,
            strategy = %self.strategy,
            bound = %self.waiter.bound(),
            "Collecting delays"
        );

        let mut delays = match self.strategy {
            CollectStrategy::Concurrent => self.collect_concurrent(n, deadline).await?,
            CollectStrategy::Sequential => self.collect_sequential(n, deadline).await?,
        };
        delays.sort_unstable();

        tracing::debug!(
            count = n,
            strategy = %self.strategy,
            elapsed_ms = started.elapsed().as_millis(),
            "Collected delays"
        );
        Ok(delays)
    }

    async fn collect_concurrent(
        &self,
        n: usize,
        deadline: Option<Deadline>,
    ) -> Result<Vec<Delay>, CollectError> {
        let mut set = JoinSet::new();
        for _ in 0..n {
            let waiter = self.waiter;
            set.spawn(async move { waiter.wait().await });
        }
        drain(set, n, deadline).await
    }

    async fn collect_sequential(
        &self,
        n: usize,
        deadline: Option<Deadline>,
    ) -> Result<Vec<Delay>, CollectError> {
        let mut delays = Vec::with_capacity(n);
        for _ in 0..n {
            let delay = match deadline {
                Some(deadline) => timeout_at(deadline.at, self.waiter.wait())
                    .await
                    .map_err(|_| deadline_elapsed(deadline, delays.len(), n))?,
                None => self.waiter.wait().await,
            };
            delays.push(delay);
        }
        Ok(delays)
    }
}

/// Join every task in `set`. The first failed task or an elapsed deadline ends
/// the run and aborts whatever is still sleeping.
async fn drain(
    mut set: JoinSet<Delay>,
    requested: usize,
    deadline: Option<Deadline>,
) -> Result<Vec<Delay>, CollectError> {
    let mut delays = Vec::with_capacity(requested);
    loop {
        let next = match deadline {
            Some(deadline) => match timeout_at(deadline.at, set.join_next()).await {
                Ok(next) => next,
                Err(_) => {
                    set.abort_all();
                    return Err(deadline_elapsed(deadline, delays.len(), requested));
                }
            },
            None => set.join_next().await,
        };
        let Some(result) = next else {
            break;
        };
        match result {
            Ok(delay) => delays.push(delay),
            Err(err) => {
                tracing::debug!(completed = delays.len(), requested, "Waiter task failed");
                set.abort_all();
                return Err(err.into());
            }
        }
    }
    Ok(delays)
}

fn deadline_elapsed(deadline: Deadline, completed: usize, requested: usize) -> CollectError {
    tracing::debug!(
        deadline_ms = deadline.limit.as_millis(),
        completed,
        requested,
        "Collector deadline elapsed"
    );
    CollectError::DeadlineElapsed {
        deadline: deadline.limit,
        completed,
        requested,
    }
}

/// Wait `n` random delays in `[0, max_delay)` seconds concurrently and return
/// them sorted ascending.
pub async fn wait_n(n: usize, max_delay: f64) -> Result<Vec<Delay>, CollectError> {
    let bound = DelayBound::new(max_delay)?;
    Collector::new(Waiter::new(bound)).collect(n).await
}
