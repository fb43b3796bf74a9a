//! Provider selection
//!
//! A provider is chosen with a string of the form `<scheme>::<context>`:
//!
//! | Scheme | Context | Example |
//! | --- | --- | --- |
//! | `file` | path of a flat `key = value` file | `file::./config.ini` |
//! | `env` | ignored | `env::` |
//! | `etcd` | `http://host:port/dir` | `etcd::http://127.0.0.1:2379/app` |

use crate::adapters::env::EnvProvider;
use crate::adapters::etcd::EtcdProvider;
use crate::adapters::file::FileProvider;
use crate::adapters::traits::Provider;
use crate::config::schema::ArborSettings;
use crate::domain::errors::ArborError;
use crate::domain::Result;
use crate::store::TreeStore;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Provider used when nothing else is configured
pub const DEFAULT_PROVIDER: &str = "file::./config.ini";

/// Environment variable that overrides [`DEFAULT_PROVIDER`]
pub const PROVIDER_ENV_VAR: &str = "GLOBAL_CONF";

const SCHEME_SEPARATOR: &str = "::";

/// Known provider schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    File,
    Env,
    Etcd,
}

impl ProviderKind {
    pub fn scheme(&self) -> &'static str {
        match self {
            ProviderKind::File => "file",
            ProviderKind::Env => "env",
            ProviderKind::Etcd => "etcd",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ArborError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "file" => Ok(ProviderKind::File),
            "env" => Ok(ProviderKind::Env),
            "etcd" => Ok(ProviderKind::Etcd),
            _ => Err(ArborError::UnknownProvider(s.to_string())),
        }
    }
}

/// A parsed provider selection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    pub context: String,
}

impl ProviderSpec {
    /// Parse `<scheme>::<context>`
    ///
    /// # Errors
    ///
    /// Returns `ArborError::UnknownProvider` if the separator is missing or
    /// the scheme is not known.
    pub fn parse(spec: &str) -> Result<Self> {
        let (scheme, context) = spec
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| ArborError::UnknownProvider(spec.to_string()))?;
        let kind = scheme
            .parse::<ProviderKind>()
            .map_err(|_| ArborError::UnknownProvider(spec.to_string()))?;

        Ok(Self {
            kind,
            context: context.to_string(),
        })
    }

    /// Selection from `GLOBAL_CONF`, else [`DEFAULT_PROVIDER`]
    pub fn from_env() -> Result<Self> {
        match std::env::var(PROVIDER_ENV_VAR) {
            Ok(spec) if !spec.trim().is_empty() => Self::parse(spec.trim()),
            _ => Self::parse(DEFAULT_PROVIDER),
        }
    }
}

impl FromStr for ProviderSpec {
    type Err = ArborError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind.scheme(), SCHEME_SEPARATOR, self.context)
    }
}

/// Create the provider described by `spec`
///
/// # Errors
///
/// Returns an error if the provider cannot be constructed (for example an
/// invalid remote URL).
pub fn create_provider(spec: &ProviderSpec, settings: &ArborSettings) -> Result<Box<dyn Provider>> {
    let env_overlay = settings.source.env_overlay;

    match spec.kind {
        ProviderKind::File => {
            tracing::debug!(path = %spec.context, "Creating file provider");
            Ok(Box::new(
                FileProvider::new(&spec.context).with_env_overlay(env_overlay),
            ))
        }
        ProviderKind::Env => {
            tracing::debug!("Creating environment provider");
            Ok(Box::new(EnvProvider::new()))
        }
        ProviderKind::Etcd => {
            tracing::debug!(context = %spec.context, "Creating remote provider");
            let timeout = Duration::from_secs(settings.remote.timeout_seconds);
            Ok(Box::new(
                EtcdProvider::new(&spec.context, timeout)?.with_env_overlay(env_overlay),
            ))
        }
    }
}

/// Parse `spec`, build its provider and load a store from it
pub async fn load_store(spec: &str, settings: &ArborSettings) -> Result<TreeStore> {
    let spec = ProviderSpec::parse(spec)?;
    let provider = create_provider(&spec, settings)?;
    let store = provider.load().await?;
    tracing::info!(provider = provider.name(), "Configuration store loaded");
    Ok(store)
}
