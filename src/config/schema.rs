//! Settings schema types
//!
//! These are Arbor's own settings: which provider to load the configuration
//! store from, how to reach remote sources, and how to log. They are read from
//! a small TOML file, not from the store itself.

use crate::adapters::factory::DEFAULT_PROVIDER;
use serde::Deserialize;

/// Root settings structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArborSettings {
    /// Where the configuration store is loaded from
    #[serde(default)]
    pub source: SourceConfig,

    /// Remote key-directory settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArborSettings {
    /// Validates the settings
    ///
    /// # Errors
    ///
    /// Returns an error if any setting is out of range
    pub fn validate(&self) -> Result<(), String> {
        self.source.validate()?;
        self.remote.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Provider selection
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Provider selection string, `<scheme>::<context>`
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Layer process environment variables under file and remote values
    #[serde(default = "default_true")]
    pub env_overlay: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            env_overlay: true,
        }
    }
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.provider.contains("::") {
            return Err(format!(
                "source.provider '{}' must have the form <scheme>::<context>",
                self.provider
            ));
        }
        Ok(())
    }
}

/// Remote key-directory settings
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl RemoteConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err("remote.timeout_seconds must be between 1 and 300".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
