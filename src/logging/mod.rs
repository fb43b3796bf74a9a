//! Logging
//!
//! Structured logging through `tracing`, with console output and optional
//! JSON files with rotation.
//!
//! # Example
//!
//! ```no_run
//! use arbor::logging::init_logging;
//! use arbor::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(provider = "file", "Configuration store loaded");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
