//! Flat-file provider
//!
//! Reads `key = value` lines into a store. Lines starting with `#` and
//! `[section]` header lines are skipped; sections carry no meaning, so every
//! key is taken as written. Keys are trimmed and lowercased, values trimmed.
//! A line without `=` stores its key with an empty value.

use crate::adapters::env::EnvProvider;
use crate::adapters::traits::Provider;
use crate::domain::errors::ArborError;
use crate::domain::Result;
use crate::store::TreeStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Loads a store from a flat `key = value` file
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    env_overlay: bool,
    env: EnvProvider,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_overlay: true,
            env: EnvProvider::new(),
        }
    }

    /// Enable or disable layering environment variables under file values
    pub fn with_env_overlay(mut self, enabled: bool) -> Self {
        self.env_overlay = enabled;
        self
    }

    /// Overlay from `env` instead of the live process environment
    pub fn with_env_source(mut self, env: EnvProvider) -> Self {
        self.env = env;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse file contents into a fresh store
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Provider` naming the line if an entry cannot be
    /// stored (for example `a = 1` followed by `a.b = 2`).
    pub fn parse_contents(contents: &str) -> Result<TreeStore> {
        let store = TreeStore::new();

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                continue;
            }

            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key, value.trim()),
                None => (line, ""),
            };
            let key = key.trim().to_lowercase();

            store.set(&key, value).map_err(|e| {
                ArborError::Provider(format!("line {}: {}", index + 1, e))
            })?;
        }

        Ok(store)
    }
}

#[async_trait]
impl Provider for FileProvider {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<TreeStore> {
        tracing::info!(path = %self.path.display(), "Loading configuration file");

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ArborError::Provider(format!(
                "Failed to read configuration file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let store = Self::parse_contents(&contents).map_err(|e| match e {
            ArborError::Provider(msg) => {
                ArborError::Provider(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;

        if self.env_overlay {
            store.merge_from(&self.env.snapshot(), false);
        }

        tracing::debug!(path = %self.path.display(), count = store.flatten().len(), "Loaded configuration file");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
# service settings
[server]
Server.Host = 0.0.0.0
server.port=8080
server.name = \"edge\"

flag
list = a;b;c
";

    #[test]
    fn test_parse_contents() {
        let store = FileProvider::parse_contents(SAMPLE).unwrap();

        assert_eq!(store.get("server.host").unwrap(), "0.0.0.0");
        assert_eq!(store.get("server.port").unwrap(), "8080");
        assert_eq!(store.get("server.name").unwrap(), "edge");
        assert_eq!(store.get("flag").unwrap(), "");
        assert_eq!(store.get("list").unwrap(), "a;b;c");
        assert!(store.get("[server]").is_err());
    }

    #[test]
    fn test_windows_line_endings() {
        let store = FileProvider::parse_contents("a = 1\r\nb = 2\r\n").unwrap();
        assert_eq!(store.get("a").unwrap(), "1");
        assert_eq!(store.get("b").unwrap(), "2");
    }

    #[test]
    fn test_shape_conflict_names_line() {
        let err = FileProvider::parse_contents("a = 1\na.b = 2\n").unwrap_err();
        assert!(matches!(err, ArborError::Provider(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let provider = FileProvider::new("/nonexistent/arbor/config.ini");
        let err = provider.load().await.unwrap_err();
        assert!(matches!(err, ArborError::Provider(_)));
    }

    #[tokio::test]
    async fn test_env_overlay_does_not_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"port = 8080\n").unwrap();
        file.flush().unwrap();

        let env = EnvProvider::from_vars([("port", "9090"), ("APP_MODE", "prod")]);
        let store = FileProvider::new(file.path())
            .with_env_source(env.clone())
            .load()
            .await
            .unwrap();
        assert_eq!(store.get("port").unwrap(), "8080");
        assert_eq!(store.get("APP_MODE").unwrap(), "prod");

        let store = FileProvider::new(file.path())
            .with_env_source(env)
            .with_env_overlay(false)
            .load()
            .await
            .unwrap();
        assert!(store.get("APP_MODE").is_err());
    }
}
