//! CLI command implementations

pub mod dump;
pub mod get;
pub mod validate;

use crate::adapters::factory::load_store;
use crate::config::ArborSettings;
use crate::store::TreeStore;

/// Load the store for a command, printing the failure
///
/// Returns `None` after reporting the error; callers exit with code 5.
pub(crate) async fn open_store(source: &str, settings: &ArborSettings) -> Option<TreeStore> {
    match load_store(source, settings).await {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::error!(provider = %source, error = %e, "Failed to load configuration");
            eprintln!("Error: failed to load configuration from {source}: {e}");
            None
        }
    }
}
