//! Settings management for Arbor.
//!
//! Arbor's own behavior (which provider to load from, remote timeouts,
//! logging) is configured through a small TOML file, separate from the
//! configuration store it manages.
//!
//! # Example Settings
//!
//! ```toml
//! [source]
//! provider = "file::./config.ini"
//! env_overlay = true
//!
//! [remote]
//! timeout_seconds = 3
//!
//! [logging]
//! level = "info"
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Environment Variables
//!
//! Every setting can be overridden with `ARBOR_<SECTION>_<KEY>`:
//!
//! ```bash
//! export ARBOR_SOURCE_PROVIDER="env::"
//! export ARBOR_LOGGING_LEVEL="debug"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_settings, load_settings_or_default};
pub use schema::{ArborSettings, LoggingConfig, RemoteConfig, SourceConfig};
