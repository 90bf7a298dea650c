//! Configuration loading for lull.
//!
//! ```toml
//! [waiter]
//! max_delay = 10.0
//! time_unit_ms = 1000
//!
//! [collector]
//! count = 5
//! strategy = "concurrent"
//! deadline_ms = 30000
//! ```
//!
//! Every field is optional. [`LullConfig::resolve`] layers CLI overrides over
//! file values over defaults and validates the result into
//! [`CollectorSettings`].

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use lull_types::{
    CollectStrategy, CollectorSettings, DEFAULT_TIME_UNIT, DelayBound, DelayCount,
    InvalidArgument,
};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "LULL_CONFIG";

/// Number of waiters a collector runs when nothing says otherwise.
pub const DEFAULT_COUNT: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct LullConfig {
    pub waiter: Option<WaiterConfig>,
    pub collector: Option<CollectorConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WaiterConfig {
    /// Exclusive upper bound for sampled delays. Default: 10.
    pub max_delay: Option<f64>,
    /// Wall-clock milliseconds per delay unit. Default: 1000.
    pub time_unit_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CollectorConfig {
    /// Signed so a negative value reaches validation instead of failing as a type error.
    pub count: Option<i64>,
    pub strategy: Option<CollectStrategy>,
    /// Abort the run if it takes longer than this. Default: no deadline.
    pub deadline_ms: Option<u64>,
}

/// Values supplied on the command line. `None` defers to the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub max_delay: Option<f64>,
    pub count: Option<i64>,
    pub strategy: Option<CollectStrategy>,
    pub time_unit_ms: Option<u64>,
    pub deadline_ms: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl LullConfig {
    /// Load from the default location. `Ok(None)` means no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file");
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Merge `overrides` over this config over defaults, then validate.
    pub fn resolve(&self, overrides: &Overrides) -> Result<CollectorSettings, InvalidArgument> {
        let waiter = self.waiter.as_ref();
        let collector = self.collector.as_ref();

        let max_delay = overrides
            .max_delay
            .or_else(|| waiter.and_then(|w| w.max_delay));
        let bound = match max_delay {
            Some(value) => DelayBound::new(value)?,
            None => DelayBound::DEFAULT,
        };

        let count = match overrides
            .count
            .or_else(|| collector.and_then(|c| c.count))
        {
            Some(value) => DelayCount::try_from(value)?,
            None => DelayCount::new(DEFAULT_COUNT),
        };

        let strategy = overrides
            .strategy
            .or_else(|| collector.and_then(|c| c.strategy))
            .unwrap_or_default();

        let time_unit = overrides
            .time_unit_ms
            .or_else(|| waiter.and_then(|w| w.time_unit_ms))
            .map_or(DEFAULT_TIME_UNIT, Duration::from_millis);

        let deadline = overrides
            .deadline_ms
            .or_else(|| collector.and_then(|c| c.deadline_ms))
            .map(Duration::from_millis);

        Ok(CollectorSettings::new(bound, count)
            .with_strategy(strategy)
            .with_time_unit(time_unit)
            .with_deadline(deadline))
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".lull").join("config.toml"))
}
