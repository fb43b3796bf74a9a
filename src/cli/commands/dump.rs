//! `dump` command implementation

use super::open_store;
use crate::config::ArborSettings;
use clap::Args;

/// Arguments for the dump command
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Only print the subtree under this key
    #[arg(short, long)]
    pub prefix: Option<String>,
}

impl DumpArgs {
    /// Execute the dump command
    pub async fn execute(&self, source: &str, settings: &ArborSettings) -> anyhow::Result<i32> {
        let Some(store) = open_store(source, settings).await else {
            return Ok(5);
        };

        let store = match &self.prefix {
            Some(prefix) => match store.child(prefix) {
                Ok(subtree) => subtree,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return Ok(1);
                }
            },
            None => store,
        };

        tracing::debug!(count = store.flatten().len(), "Dumping configuration");
        print!("{store}");
        Ok(0)
    }
}
