//! Configuration loading helpers.
//!
//! The profiler has exactly one tunable: the window capacity. It can come
//! from a TOML file (path in `OXIMRC_CONFIG`) and be overridden per
//! deployment with `OXIMRC__window__capacity`.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::DEFAULT_WINDOW_CAPACITY;

/// Errors returned by configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error while reading config files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Invalid value for a key.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Raw value string.
        value: String,
    },
    /// Unknown configuration key.
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Top-level configuration schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OximrcConfig {
    /// Access window configuration.
    pub window: Option<WindowSpec>,
}

/// Access window overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowSpec {
    /// Ring capacity in accesses.
    pub capacity: Option<usize>,
}

impl OximrcConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration from the `OXIMRC_CONFIG` env var (if set), then
    /// apply `OXIMRC__section__field` overrides.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let config_path = env::var("OXIMRC_CONFIG").ok();
        let mut config = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment overrides in-place.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        for (key, value) in env::vars() {
            if !key.starts_with("OXIMRC__") {
                continue;
            }
            let path = key["OXIMRC__".len()..].to_ascii_lowercase();
            let parts: Vec<&str> = path.split("__").collect();
            let value = value.trim().to_string();

            match parts.as_slice() {
                ["window", "capacity"] => {
                    self.window_mut().capacity = Some(parse_value(&key, &value)?);
                }
                _ => return Err(ConfigError::UnknownKey(key)),
            }
        }

        Ok(())
    }

    /// Resolved window capacity: the configured value or the default.
    pub fn window_capacity(&self) -> usize {
        self.window
            .as_ref()
            .and_then(|window| window.capacity)
            .unwrap_or(DEFAULT_WINDOW_CAPACITY)
    }

    fn window_mut(&mut self) -> &mut WindowSpec {
        if self.window.is_none() {
            self.window = Some(WindowSpec::default());
        }
        self.window.as_mut().expect("window config")
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
