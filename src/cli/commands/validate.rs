//! `validate-config` command implementation

use crate::adapters::factory::ProviderSpec;
use crate::config::ArborSettings;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Settings were already loaded and validated by the caller; this checks
    /// the provider selection and prints a summary.
    pub async fn execute(
        &self,
        settings_path: &str,
        source: &str,
        settings: &ArborSettings,
    ) -> anyhow::Result<i32> {
        tracing::info!(settings_path = %settings_path, "Validating settings");

        println!("🔍 Validating settings: {settings_path}");
        println!();

        let spec = match ProviderSpec::parse(source) {
            Ok(spec) => spec,
            Err(e) => {
                println!("❌ Invalid provider selection");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Settings are valid");
        println!();
        println!("Settings Summary:");
        println!("  Provider: {spec}");
        println!("  Scheme: {}", spec.kind.scheme());
        println!("  Env Overlay: {}", settings.source.env_overlay);
        println!("  Remote Timeout: {}s", settings.remote.timeout_seconds);
        println!("  Log Level: {}", settings.logging.level);
        if settings.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                settings.logging.local_path, settings.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
