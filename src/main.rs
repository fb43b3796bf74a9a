// Arbor - Hierarchical configuration store
// Copyright (c) 2025 Arbor Contributors
// Licensed under the MIT License

use arbor::cli::{Cli, Commands};
use arbor::config::{load_settings_or_default, ArborSettings};
use arbor::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let settings = match load_settings_or_default(&cli.settings) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load settings from {}", cli.settings);
            eprintln!("   Error: {e}");
            process::exit(2);
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.logging.level.clone());
    let logging_guard = match init_logging(&log_level, &settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Arbor starting");

    let exit_code = match execute_command(&cli, &settings).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(logging_guard);
    process::exit(exit_code);
}

async fn execute_command(cli: &Cli, settings: &ArborSettings) -> anyhow::Result<i32> {
    let source = cli.resolve_source(settings);
    match &cli.command {
        Commands::Get(args) => args.execute(&source, settings).await,
        Commands::Dump(args) => args.execute(&source, settings).await,
        Commands::ValidateConfig(args) => args.execute(&cli.settings, &source, settings).await,
    }
}
