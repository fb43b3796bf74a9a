//! Environment snapshot provider

use crate::adapters::traits::Provider;
use crate::domain::Result;
use crate::store::TreeStore;
use async_trait::async_trait;

/// Produces a store holding one leaf per environment variable
///
/// Variable names are stored verbatim as single top-level names. Dots inside a
/// name are not treated as path separators, so `A.B=1` becomes the leaf
/// `A.B`, reachable with the quoted key `"A.B"`.
#[derive(Debug, Clone, Default)]
pub struct EnvProvider {
    vars: Option<Vec<(String, String)>>,
}

impl EnvProvider {
    /// Snapshot the live process environment on each load
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed set of variables instead of the process environment
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Build the store synchronously
    ///
    /// Wrapping double quotes around values are stripped, as with
    /// [`TreeStore::set`]. Variables whose name or value is not valid Unicode
    /// are skipped.
    pub fn snapshot(&self) -> TreeStore {
        let store = TreeStore::new();
        let mut count = 0usize;

        let mut put = |name: &str, value: &str| {
            if name.is_empty() {
                return;
            }
            match store.set_leaf(name, value.trim_matches('"')) {
                Ok(()) => count += 1,
                Err(e) => tracing::debug!(name, error = %e, "Skipping environment variable"),
            }
        };

        match &self.vars {
            Some(vars) => {
                for (name, value) in vars {
                    put(name, value);
                }
            }
            None => {
                for (name, value) in std::env::vars_os() {
                    match (name.to_str(), value.to_str()) {
                        (Some(name), Some(value)) => put(name, value),
                        _ => tracing::debug!("Skipping non-unicode environment variable"),
                    }
                }
            }
        }

        tracing::debug!(count, "Captured environment snapshot");
        store
    }
}

#[async_trait]
impl Provider for EnvProvider {
    fn name(&self) -> &'static str {
        "env"
    }

    async fn load(&self) -> Result<TreeStore> {
        Ok(self.snapshot())
    }
}
