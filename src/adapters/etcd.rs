//! Remote key-directory provider
//!
//! Lists a directory recursively through the etcd v2 keys HTTP API and stores
//! every leaf key with its slashes turned into dots: `/app/db/host` becomes
//! `app.db.host`.

use crate::adapters::env::EnvProvider;
use crate::adapters::traits::Provider;
use crate::domain::errors::ArborError;
use crate::domain::Result;
use crate::store::TreeStore;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 3;

/// Response body of `GET /v2/keys/<dir>`
#[derive(Debug, Deserialize)]
struct EtcdResponse {
    node: EtcdNode,
}

#[derive(Debug, Deserialize)]
struct EtcdNode {
    key: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    dir: bool,
    #[serde(default)]
    nodes: Vec<EtcdNode>,
}

/// Loads a store from a remote key directory
#[derive(Debug, Clone)]
pub struct EtcdProvider {
    endpoint: Url,
    dir: String,
    client: Client,
    env_overlay: bool,
    env: EnvProvider,
}

impl EtcdProvider {
    /// Create a provider for `http://host:port/dir`
    ///
    /// A context without a scheme is taken as plain HTTP. An empty path lists
    /// the root directory.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Configuration` if the context is not a valid URL
    /// and `ArborError::Remote` if the HTTP client cannot be built.
    pub fn new(context: &str, timeout: Duration) -> Result<Self> {
        let raw = if context.contains("://") {
            context.to_string()
        } else {
            format!("http://{context}")
        };
        let parsed = Url::parse(&raw).map_err(|e| {
            ArborError::Configuration(format!("Invalid remote provider URL '{context}': {e}"))
        })?;

        let dir = match parsed.path().trim_end_matches('/') {
            "" => "/".to_string(),
            path => path.to_string(),
        };

        let mut endpoint = parsed;
        endpoint.set_path("");
        endpoint.set_query(None);

        let client = ClientBuilder::new().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            dir,
            client,
            env_overlay: true,
            env: EnvProvider::new(),
        })
    }

    /// Enable or disable layering environment variables under remote values
    pub fn with_env_overlay(mut self, enabled: bool) -> Self {
        self.env_overlay = enabled;
        self
    }

    /// Overlay from `env` instead of the live process environment
    pub fn with_env_source(mut self, env: EnvProvider) -> Self {
        self.env = env;
        self
    }

    /// The directory being listed, always starting with `/`
    pub fn dir(&self) -> &str {
        &self.dir
    }

    fn keys_url(&self) -> String {
        let base = self.endpoint.as_str().trim_end_matches('/');
        if self.dir == "/" {
            format!("{base}/v2/keys/")
        } else {
            format!("{base}/v2/keys{}", self.dir)
        }
    }

    async fn fetch(&self, store: &TreeStore) -> Result<()> {
        let url = self.keys_url();
        tracing::debug!(url = %url, "Listing remote key directory");

        let resp = self
            .client
            .get(&url)
            .query(&[("recursive", "true")])
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => {
                let body: EtcdResponse = resp.json().await.map_err(|e| {
                    ArborError::Remote(format!("Invalid response from {url}: {e}"))
                })?;
                if !body.node.dir {
                    return Err(ArborError::Remote(format!(
                        "{} is not a directory",
                        self.dir
                    )));
                }
                store_nodes(store, &body.node)
            }
            StatusCode::NOT_FOUND => {
                tracing::warn!(dir = %self.dir, "Remote key directory not found, starting empty");
                Ok(())
            }
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(ArborError::Remote(format!(
                    "Listing {url} failed with status {status}: {body}"
                )))
            }
        }
    }
}

fn store_nodes(store: &TreeStore, node: &EtcdNode) -> Result<()> {
    for child in &node.nodes {
        if child.dir {
            store_nodes(store, child)?;
            continue;
        }
        let Some(key) = child.key.as_deref() else {
            continue;
        };
        let key = key.trim_start_matches('/').replace('/', ".");
        store.set(&key, child.value.as_deref().unwrap_or_default())?;
    }
    Ok(())
}

#[async_trait]
impl Provider for EtcdProvider {
    fn name(&self) -> &'static str {
        "etcd"
    }

    async fn load(&self) -> Result<TreeStore> {
        tracing::info!(endpoint = %self.endpoint, dir = %self.dir, "Loading remote configuration");

        let store = TreeStore::new();
        self.fetch(&store).await?;

        if self.env_overlay {
            store.merge_from(&self.env.snapshot(), false);
        }
        Ok(store)
    }
}
