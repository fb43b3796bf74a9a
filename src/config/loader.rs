//! Settings loader with TOML parsing and environment variable overrides

use super::schema::ArborSettings;
use crate::domain::errors::ArborError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Loads settings from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Parses it into `ArborSettings`
/// 3. Applies environment variable overrides (`ARBOR_*` prefix)
/// 4. Validates the result
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML does not parse, or
/// validation fails
///
/// # Examples
///
/// ```no_run
/// use arbor::config::loader::load_settings;
///
/// let settings = load_settings("arbor.toml").expect("Failed to load settings");
/// ```
pub fn load_settings(path: impl AsRef<Path>) -> Result<ArborSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ArborError::Configuration(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ArborError::Configuration(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut settings: ArborSettings = toml::from_str(&contents)?;
    finish(&mut settings)?;

    tracing::debug!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Loads settings from `path` if it exists, else starts from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_settings_or_default(path: impl AsRef<Path>) -> Result<ArborSettings> {
    let path = path.as_ref();
    if path.exists() {
        return load_settings(path);
    }

    tracing::debug!(path = %path.display(), "Settings file absent, using defaults");
    let mut settings = ArborSettings::default();
    finish(&mut settings)?;
    Ok(settings)
}

fn finish(settings: &mut ArborSettings) -> Result<()> {
    apply_env_overrides(settings);
    settings
        .validate()
        .map_err(|e| ArborError::Configuration(format!("Settings validation failed: {e}")))
}

/// Applies environment variable overrides using the `ARBOR_` prefix
///
/// Variables follow the pattern `ARBOR_<SECTION>_<KEY>`, for example
/// `ARBOR_SOURCE_PROVIDER` or `ARBOR_LOGGING_LEVEL`.
fn apply_env_overrides(settings: &mut ArborSettings) {
    if let Ok(val) = std::env::var("ARBOR_SOURCE_PROVIDER") {
        settings.source.provider = val;
    }
    if let Ok(val) = std::env::var("ARBOR_SOURCE_ENV_OVERLAY") {
        settings.source.env_overlay = val.parse().unwrap_or(true);
    }

    if let Ok(val) = std::env::var("ARBOR_REMOTE_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            settings.remote.timeout_seconds = seconds;
        }
    }

    if let Ok(val) = std::env::var("ARBOR_LOGGING_LEVEL") {
        settings.logging.level = val;
    }
    if let Ok(val) = std::env::var("ARBOR_LOGGING_LOCAL_ENABLED") {
        settings.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ARBOR_LOGGING_LOCAL_PATH") {
        settings.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("ARBOR_LOGGING_LOCAL_ROTATION") {
        settings.logging.local_rotation = val;
    }
}
