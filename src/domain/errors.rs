//! Domain error types
//!
//! Two layers: [`StoreError`] is raised by the tree store, its typed accessors
//! and the struct binder. [`ArborError`] is the crate-wide error that wraps it
//! together with provider, settings and context failures.

use thiserror::Error;

/// Errors raised by the store layer
///
/// Every variant carries the dotted path it refers to so the caller can tell
/// which key failed without extra context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A path segment did not resolve
    #[error("key not found: {path}")]
    NotFound { path: String },

    /// The value exists but cannot be read as the requested kind
    #[error("cannot convert value at {path} to {kind}")]
    ConversionFailed { path: String, kind: &'static str },

    /// A name would exist both as a leaf and as a subtree at one level
    #[error("key conflict at {path}: name is already used as a {existing}")]
    Conflict {
        path: String,
        existing: &'static str,
    },

    /// A positional list is missing an index before its last element
    #[error("list at {path} is missing index {index}")]
    ListGap { path: String, index: usize },

    /// An empty key was given to a mutating operation
    #[error("empty key")]
    EmptyPath,

    /// An error raised while binding a struct rooted at a map entry
    #[error("at {path}: {source}")]
    Nested {
        path: String,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Creates a not-found error for `path`
    pub fn not_found(path: impl Into<String>) -> Self {
        StoreError::NotFound { path: path.into() }
    }

    /// Creates a conversion error for `path`
    pub fn conversion(path: impl Into<String>, kind: &'static str) -> Self {
        StoreError::ConversionFailed {
            path: path.into(),
            kind,
        }
    }

    /// Returns true if this is an unresolvable-path error
    ///
    /// Only the outermost variant is inspected; a `Nested` error is never
    /// treated as not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns the path this error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            StoreError::NotFound { path }
            | StoreError::ConversionFailed { path, .. }
            | StoreError::Conflict { path, .. }
            | StoreError::ListGap { path, .. }
            | StoreError::Nested { path, .. } => Some(path),
            StoreError::EmptyPath => None,
        }
    }
}

/// Main Arbor error type
#[derive(Debug, Error)]
pub enum ArborError {
    /// Store, accessor or binding errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Settings-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider selection string names no known provider
    #[error("Unknown configuration provider: {0}")]
    UnknownProvider(String),

    /// A provider failed to produce a store
    #[error("Provider error: {0}")]
    Provider(String),

    /// Remote key-directory errors
    #[error("Remote error: {0}")]
    Remote(String),

    /// The process-wide context was used before it was initialized
    #[error("Configuration context is not initialized")]
    NotInitialized,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ArborError {
    /// Returns the wrapped store error, if any
    pub fn as_store_error(&self) -> Option<&StoreError> {
        match self {
            ArborError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArborError {
    fn from(err: std::io::Error) -> Self {
        ArborError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ArborError {
    fn from(err: toml::de::Error) -> Self {
        ArborError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<reqwest::Error> for ArborError {
    fn from(err: reqwest::Error) -> Self {
        ArborError::Remote(err.to_string())
    }
}
