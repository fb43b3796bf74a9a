//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Arbor using clap.

pub mod commands;

use crate::adapters::factory::PROVIDER_ENV_VAR;
use crate::config::ArborSettings;
use clap::{Parser, Subcommand};

/// Arbor - hierarchical configuration inspector
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(version, about, long_about = None)]
#[command(author = "Arbor Contributors")]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "arbor.toml", env = "ARBOR_SETTINGS")]
    pub settings: String,

    /// Provider selection string, e.g. file::./config.ini
    #[arg(long, env = "ARBOR_SOURCE")]
    pub source: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ARBOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read one key with a typed accessor
    Get(commands::get::GetArgs),

    /// Print every key in the store
    Dump(commands::dump::DumpArgs),

    /// Validate the settings file and provider selection
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Cli {
    /// The provider selection in effect
    ///
    /// `--source` wins, then `GLOBAL_CONF`, then `source.provider` from the
    /// settings.
    pub fn resolve_source(&self, settings: &ArborSettings) -> String {
        if let Some(source) = &self.source {
            return source.clone();
        }
        match std::env::var(PROVIDER_ENV_VAR) {
            Ok(spec) if !spec.trim().is_empty() => spec.trim().to_string(),
            _ => settings.source.provider.clone(),
        }
    }
}
