//! Control channel configuration.
//!
//! Three sources, all producing a validated [`ChannelConfig`]:
//!
//! - [`ChannelConfig::default`]
//! - [`ChannelConfig::from_json`], camelCase keys, every key optional
//! - [`ChannelConfig::from_env`], `WEXT_*` variables, every variable optional
//!
//! ```
//! use wext::ChannelConfig;
//! use std::time::Duration;
//!
//! let config = ChannelConfig::from_json(r#"{"retryInterval": 50, "maxRetries": 10}"#).unwrap();
//! assert_eq!(config.retry_interval, Duration::from_millis(50));
//! assert_eq!(config.max_retries, 10);
//! assert_eq!(config.initial_buffer_size, 4096);
//! ```

use crate::codec::consts::IW_SCAN_MAX_DATA;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Largest buffer an `iw_point` can describe (its length is a `u16`).
pub const MAX_POINT_LEN: usize = u16::MAX as usize;

pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_MAX_RETRIES: u32 = 150;
pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = IW_SCAN_MAX_DATA;
pub const DEFAULT_MAX_BUFFER_SIZE: usize = MAX_POINT_LEN;

pub const ENV_RETRY_INTERVAL_MS: &str = "WEXT_RETRY_INTERVAL_MS";
pub const ENV_MAX_RETRIES: &str = "WEXT_MAX_RETRIES";
pub const ENV_INITIAL_BUFFER_SIZE: &str = "WEXT_INITIAL_BUFFER_SIZE";
pub const ENV_MAX_BUFFER_SIZE: &str = "WEXT_MAX_BUFFER_SIZE";

/// Tuning for the retry and buffer-growth protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Pause between "try again" retries.
    pub retry_interval: Duration,
    /// Retries after the first attempt before giving up as busy.
    pub max_retries: u32,
    /// First buffer size offered for variable-length responses.
    pub initial_buffer_size: usize,
    /// Buffer size at which growth stops.
    pub max_buffer_size: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            retry_interval: DEFAULT_RETRY_INTERVAL,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_buffer_size: DEFAULT_INITIAL_BUFFER_SIZE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }
}

/// JSON shape: every field optional, durations in milliseconds.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    retry_interval: Option<u64>,
    #[serde(default)]
    max_retries: Option<u32>,
    #[serde(default)]
    initial_buffer_size: Option<usize>,
    #[serde(default)]
    max_buffer_size: Option<usize>,
}

impl ChannelConfig {
    /// Check the invariants the control channel relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry_interval.is_zero() {
            return Err(ConfigError::ZeroRetryInterval);
        }
        if self.max_retries == 0 {
            return Err(ConfigError::ZeroRetries);
        }
        if self.initial_buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        if self.max_buffer_size > MAX_POINT_LEN {
            return Err(ConfigError::BufferTooLarge {
                size: self.max_buffer_size,
                max: MAX_POINT_LEN,
            });
        }
        if self.initial_buffer_size > self.max_buffer_size {
            return Err(ConfigError::InitialExceedsMax {
                initial: self.initial_buffer_size,
                max: self.max_buffer_size,
            });
        }
        Ok(())
    }

    /// Parse a JSON object, filling absent keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        let defaults = Self::default();

        let config = Self {
            retry_interval: raw
                .retry_interval
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_interval),
            max_retries: raw.max_retries.unwrap_or(defaults.max_retries),
            initial_buffer_size: raw
                .initial_buffer_size
                .unwrap_or(defaults.initial_buffer_size),
            max_buffer_size: raw.max_buffer_size.unwrap_or(defaults.max_buffer_size),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read `WEXT_*` environment variables, filling absent ones with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(
            lookup: &dyn Fn(&str) -> Option<String>,
            key: &'static str,
        ) -> Result<Option<T>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidVariable { key, value }),
            }
        }

        let defaults = Self::default();
        let config = Self {
            retry_interval: parse::<u64>(&lookup, ENV_RETRY_INTERVAL_MS)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_interval),
            max_retries: parse(&lookup, ENV_MAX_RETRIES)?.unwrap_or(defaults.max_retries),
            initial_buffer_size: parse(&lookup, ENV_INITIAL_BUFFER_SIZE)?
                .unwrap_or(defaults.initial_buffer_size),
            max_buffer_size: parse(&lookup, ENV_MAX_BUFFER_SIZE)?
                .unwrap_or(defaults.max_buffer_size),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroRetryInterval,
    ZeroRetries,
    ZeroBufferSize,
    /// Maximum buffer exceeds what an `iw_point` can describe.
    BufferTooLarge { size: usize, max: usize },
    InitialExceedsMax { initial: usize, max: usize },
    /// JSON did not parse or had unknown keys.
    InvalidFormat(String),
    /// An environment variable did not parse.
    InvalidVariable { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRetryInterval => write!(f, "retry interval must be positive"),
            Self::ZeroRetries => write!(f, "max retries must be positive"),
            Self::ZeroBufferSize => write!(f, "initial buffer size must be positive"),
            Self::BufferTooLarge { size, max } => {
                write!(f, "max buffer size too large: {} bytes (max {})", size, max)
            }
            Self::InitialExceedsMax { initial, max } => write!(
                f,
                "initial buffer size {} exceeds max buffer size {}",
                initial, max
            ),
            Self::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            Self::InvalidVariable { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
