//! Delay value types.
//!
//! These types guarantee valid sampling inputs by construction. Once you hold a
//! `DelayBound` or `DelayCount`, the waiter and collector can use it without
//! re-checking.

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The single failure kind for caller-supplied delay parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("delay bound must be non-negative, got {0}")]
    NegativeBound(f64),
    #[error("delay bound must be a finite number, got {0}")]
    NonFiniteBound(f64),
    #[error("delay count must be non-negative, got {0}")]
    NegativeCount(i64),
    #[error("delay count {0} exceeds the maximum of {max}", max = DelayCount::MAX)]
    CountTooLarge(u64),
}

/// A sampled wait, in abstract time units.
///
/// # Invariants
///
/// - Finite and `>= 0.0`
/// - Strictly less than the `DelayBound` it was sampled from (or zero for a zero bound)
///
/// Because NaN is unrepresentable, `Delay` has a total order and sorts without
/// `partial_cmp` fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delay(f64);

impl Delay {
    pub const ZERO: Delay = Delay(0.0);

    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Wall-clock time this delay occupies when one unit lasts `unit`.
    ///
    /// Saturates at `Duration::MAX` when the product does not fit; tokio clamps
    /// such sleeps to its far-future deadline.
    #[must_use]
    pub fn to_duration(self, unit: Duration) -> Duration {
        Duration::try_from_secs_f64(unit.as_secs_f64() * self.0).unwrap_or(Duration::MAX)
    }
}

impl Eq for Delay {}

impl Ord for Delay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Delay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<Delay> for f64 {
    fn from(value: Delay) -> Self {
        value.0
    }
}

/// Exclusive upper bound for delay sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayBound(f64);

impl DelayBound {
    pub const DEFAULT: DelayBound = DelayBound(10.0);
    pub const ZERO: DelayBound = DelayBound(0.0);

    pub fn new(value: f64) -> Result<Self, InvalidArgument> {
        if !value.is_finite() {
            return Err(InvalidArgument::NonFiniteBound(value));
        }
        if value < 0.0 {
            return Err(InvalidArgument::NegativeBound(value));
        }
        // Normalizes -0.0 so sampled delays never carry a negative sign.
        Ok(Self(value.abs()))
    }

    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Map a unit-interval draw onto `[0, bound)`.
    ///
    /// Out-of-range or NaN fractions are clamped into `[0, 1]`, and a product
    /// that rounds up to the bound is pulled back to the largest representable
    /// value below it.
    #[must_use]
    pub fn scale(self, fraction: f64) -> Delay {
        if self.is_zero() {
            return Delay::ZERO;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let value = self.0 * fraction;
        if value < self.0 {
            Delay(value)
        } else {
            Delay(self.0.next_down())
        }
    }
}

impl Default for DelayBound {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for DelayBound {
    type Error = InvalidArgument;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DelayBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// How many waiters a collector runs.
///
/// Capped at [`DelayCount::MAX`]; every waiter is a spawned task and a slot in
/// the result vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DelayCount(usize);

impl DelayCount {
    pub const MAX: usize = 1 << 20;

    /// Compile-time checked constructor for known counts.
    #[must_use]
    pub const fn new(count: usize) -> Self {
        assert!(count <= Self::MAX, "DelayCount exceeds DelayCount::MAX");
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for DelayCount {
    type Error = InvalidArgument;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(InvalidArgument::NegativeCount(value));
        }
        match usize::try_from(value) {
            Ok(count) => Self::try_from(count),
            Err(_) => Err(InvalidArgument::CountTooLarge(value.unsigned_abs())),
        }
    }
}

impl TryFrom<usize> for DelayCount {
    type Error = InvalidArgument;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(InvalidArgument::CountTooLarge(
                u64::try_from(value).unwrap_or(u64::MAX),
            ));
        }
        Ok(Self(value))
    }
}
