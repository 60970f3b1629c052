//! Runtime configuration, read from `GAZON_*` environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `GAZON_CHANNEL_CAPACITY` | 32 |
//! | `GAZON_SWEEP_INTERVAL_SECS` | 60 |
//! | `GAZON_PAYMENT_TIMEOUT_SECS` | 900 |
//! | `GAZON_SWEEP_ENABLED` | true |
//!
//! A missing variable falls back to its default. A variable that is set but does
//! not parse is an error, not a silent default.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

pub const CHANNEL_CAPACITY: &str = "GAZON_CHANNEL_CAPACITY";
pub const SWEEP_INTERVAL_SECS: &str = "GAZON_SWEEP_INTERVAL_SECS";
pub const PAYMENT_TIMEOUT_SECS: &str = "GAZON_PAYMENT_TIMEOUT_SECS";
pub const SWEEP_ENABLED: &str = "GAZON_SWEEP_ENABLED";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("payment timeout out of range: {0:?}")]
    TimeoutOutOfRange(Duration),
}

/// Overdue sweep settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Time between sweep passes.
    pub poll_interval: Duration,
    /// How long an order may stay unpaid before it is expired.
    pub payment_timeout: Duration,
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            payment_timeout: Duration::from_secs(15 * 60),
            enabled: true,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Zero(SWEEP_INTERVAL_SECS));
        }
        self.grace().map(|_| ())
    }

    /// `payment_timeout` as a calendar duration, for comparing with timestamps.
    pub fn grace(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::from_std(self.payment_timeout)
            .map_err(|_| ConfigError::TimeoutOutOfRange(self.payment_timeout))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GazonConfig {
    /// Request buffer of each store.
    pub channel_capacity: usize,
    pub sweep: SweepConfig,
}

impl Default for GazonConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            sweep: SweepConfig::default(),
        }
    }
}

impl GazonConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup(key)` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            channel_capacity: load(&lookup, CHANNEL_CAPACITY, defaults.channel_capacity)?,
            sweep: SweepConfig {
                poll_interval: Duration::from_secs(load(
                    &lookup,
                    SWEEP_INTERVAL_SECS,
                    defaults.sweep.poll_interval.as_secs(),
                )?),
                payment_timeout: Duration::from_secs(load(
                    &lookup,
                    PAYMENT_TIMEOUT_SECS,
                    defaults.sweep.payment_timeout.as_secs(),
                )?),
                enabled: load(&lookup, SWEEP_ENABLED, defaults.sweep.enabled)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Zero(CHANNEL_CAPACITY));
        }
        self.sweep.validate()
    }
}

fn load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = GazonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GazonConfig::default());
        assert_eq!(config.sweep.poll_interval, Duration::from_secs(60));
        assert_eq!(config.sweep.grace().unwrap(), chrono::Duration::minutes(15));
    }

    #[test]
    fn test_overrides() {
        let config = GazonConfig::from_lookup(lookup(&[
            (SWEEP_INTERVAL_SECS, "5"),
            (PAYMENT_TIMEOUT_SECS, " 120 "),
            (SWEEP_ENABLED, "false"),
        ]))
        .unwrap();
        assert_eq!(config.sweep.poll_interval, Duration::from_secs(5));
        assert_eq!(config.sweep.payment_timeout, Duration::from_secs(120));
        assert!(!config.sweep.enabled);
        assert_eq!(config.channel_capacity, 32);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let err = GazonConfig::from_lookup(lookup(&[(PAYMENT_TIMEOUT_SECS, "15m")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: PAYMENT_TIMEOUT_SECS,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = GazonConfig::from_lookup(lookup(&[(SWEEP_INTERVAL_SECS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero(SWEEP_INTERVAL_SECS));
    }
}
