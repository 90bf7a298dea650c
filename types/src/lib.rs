//! Core domain types for lull.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

pub mod annotations;
mod delay;
pub mod settings;

pub use annotations::{
    Mapping, Number, Sequence, add, concat, element_length, make_multiplier, safely_get_value,
    sum_list, sum_mixed_list, to_str,
};
pub use delay::{Delay, DelayBound, DelayCount, InvalidArgument};
pub use settings::{CollectStrategy, CollectorSettings, DEFAULT_TIME_UNIT, UnknownStrategyError};
