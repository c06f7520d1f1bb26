//! Runtime configuration.
//!
//! Defaults live in code; each option may be overridden by a `LANGSCAN_*`
//! environment variable. Invalid overrides are errors rather than being
//! silently ignored.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::processor::{RunLimits, DEFAULT_MAX_RUN_DURATION, DEFAULT_MAX_SEGMENTS};
use crate::pipeline::segmentation::{SegmentationConfig, SegmentationError, SegmentationStrategy};

/// Application-level constants
pub const APP_NAME: &str = "langscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_RATE_LIMIT: usize = 5;
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(300);
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_millis(2000);
pub const DEFAULT_BIND: &str = "127.0.0.1:8088";

pub const ENV_STRATEGY: &str = "LANGSCAN_STRATEGY";
pub const ENV_GROUP_SIZE: &str = "LANGSCAN_GROUP_SIZE";
pub const ENV_RATE_LIMIT: &str = "LANGSCAN_RATE_LIMIT";
pub const ENV_RATE_WINDOW_SECS: &str = "LANGSCAN_RATE_WINDOW_SECS";
pub const ENV_MAX_UPLOAD_BYTES: &str = "LANGSCAN_MAX_UPLOAD_BYTES";
pub const ENV_MAX_SEGMENTS: &str = "LANGSCAN_MAX_SEGMENTS";
pub const ENV_RUN_TIMEOUT_SECS: &str = "LANGSCAN_RUN_TIMEOUT_SECS";
pub const ENV_CLASSIFIER_TIMEOUT_MS: &str = "LANGSCAN_CLASSIFIER_TIMEOUT_MS";
pub const ENV_BIND: &str = "LANGSCAN_BIND";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "langscan=info,langscan_lib=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var}: expected {expected}, got {value:?}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{var}: {source}")]
    Segmentation {
        var: &'static str,
        #[source]
        source: SegmentationError,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerConfig {
    pub segmentation: SegmentationConfig,
    pub rate_limit: usize,
    pub rate_window: Duration,
    pub max_upload_bytes: u64,
    pub max_segments: usize,
    pub run_timeout: Duration,
    pub classifier_timeout: Duration,
    pub bind: SocketAddr,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window: DEFAULT_RATE_WINDOW,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_segments: DEFAULT_MAX_SEGMENTS,
            run_timeout: DEFAULT_MAX_RUN_DURATION,
            classifier_timeout: DEFAULT_CLASSIFIER_TIMEOUT,
            bind: SocketAddr::from(([127, 0, 0, 1], 8088)),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let strategy = match get(ENV_STRATEGY) {
            Some(raw) => raw
                .parse::<SegmentationStrategy>()
                .map_err(|source| ConfigError::Segmentation {
                    var: ENV_STRATEGY,
                    source,
                })?,
            None => defaults.segmentation.strategy(),
        };
        let group_size = match get(ENV_GROUP_SIZE) {
            Some(raw) => parse_number(ENV_GROUP_SIZE, &raw)?,
            None => strategy.default_group_size(),
        };
        let segmentation = SegmentationConfig::new(strategy, group_size).map_err(|source| {
            ConfigError::Segmentation {
                var: ENV_GROUP_SIZE,
                source,
            }
        })?;

        let rate_limit = match get(ENV_RATE_LIMIT) {
            Some(raw) => positive(ENV_RATE_LIMIT, &raw, parse_number(ENV_RATE_LIMIT, &raw)?)?,
            None => defaults.rate_limit,
        };
        let rate_window = match get(ENV_RATE_WINDOW_SECS) {
            Some(raw) => Duration::from_secs(positive(
                ENV_RATE_WINDOW_SECS,
                &raw,
                parse_number(ENV_RATE_WINDOW_SECS, &raw)?,
            )?),
            None => defaults.rate_window,
        };
        let max_upload_bytes = match get(ENV_MAX_UPLOAD_BYTES) {
            Some(raw) => positive(
                ENV_MAX_UPLOAD_BYTES,
                &raw,
                parse_number(ENV_MAX_UPLOAD_BYTES, &raw)?,
            )?,
            None => defaults.max_upload_bytes,
        };
        let max_segments = match get(ENV_MAX_SEGMENTS) {
            Some(raw) => positive(ENV_MAX_SEGMENTS, &raw, parse_number(ENV_MAX_SEGMENTS, &raw)?)?,
            None => defaults.max_segments,
        };
        let run_timeout = match get(ENV_RUN_TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(positive(
                ENV_RUN_TIMEOUT_SECS,
                &raw,
                parse_number(ENV_RUN_TIMEOUT_SECS, &raw)?,
            )?),
            None => defaults.run_timeout,
        };
        let classifier_timeout = match get(ENV_CLASSIFIER_TIMEOUT_MS) {
            Some(raw) => Duration::from_millis(positive(
                ENV_CLASSIFIER_TIMEOUT_MS,
                &raw,
                parse_number(ENV_CLASSIFIER_TIMEOUT_MS, &raw)?,
            )?),
            None => defaults.classifier_timeout,
        };
        let bind = match get(ENV_BIND) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_BIND,
                value: raw.clone(),
                expected: "a socket address such as 127.0.0.1:8088",
            })?,
            None => defaults.bind,
        };

        Ok(Self {
            segmentation,
            rate_limit,
            rate_window,
            max_upload_bytes,
            max_segments,
            run_timeout,
            classifier_timeout,
            bind,
        })
    }

    pub fn run_limits(&self) -> RunLimits {
        RunLimits {
            max_segments: self.max_segments,
            max_duration: self.run_timeout,
        }
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        expected: "a non-negative integer",
    })
}

fn positive<T: Default + PartialEq>(var: &'static str, raw: &str, value: T) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            expected: "a value greater than zero",
        });
    }
    Ok(value)
}
