// Arbor - Hierarchical configuration store
// Copyright (c) 2025 Arbor Contributors
// Licensed under the MIT License

//! # Arbor - hierarchical configuration
//!
//! Arbor keeps configuration as a tree of named subtrees and string leaves,
//! addressed by dotted keys (`server.http.port`), and reads it back through
//! typed accessors or by binding whole structs.
//!
//! ## Architecture
//!
//! - [`store`] - the thread-safe [`TreeStore`](store::TreeStore), merging and typed accessors
//! - [`binder`] - populating Rust structs from a store with per-field tags
//! - [`adapters`] - providers that load a store from files, the environment or a remote key directory
//! - [`context`] - an optional process-wide store with explicit initialization
//! - [`domain`] - key paths and error types
//! - [`config`] - Arbor's own settings
//! - [`logging`] - structured logging
//! - [`cli`] - the `arbor` command-line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor::store::TreeStore;
//!
//! # fn main() -> arbor::domain::Result<()> {
//! let store = TreeStore::new();
//! store.set("server.port", "8080")?;
//! store.set("server.hosts", "a.example;b.example")?;
//!
//! assert_eq!(store.get_i32("server.port", None)?, 8080);
//! assert_eq!(store.get_strings("server.hosts", None)?.len(), 2);
//! assert!(!store.get_bool("server.debug", Some("false"))?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Layering sources
//!
//! ```rust
//! use arbor::store::TreeStore;
//!
//! # fn main() -> arbor::domain::Result<()> {
//! let defaults = TreeStore::new();
//! defaults.set("db.host", "localhost")?;
//! defaults.set("db.port", "5432")?;
//!
//! let site = TreeStore::new();
//! site.set("db.host", "db.internal")?;
//!
//! // Keep site values, fill the gaps from defaults
//! site.merge_from(&defaults, false);
//! assert_eq!(site.get("db.host")?, "db.internal");
//! assert_eq!(site.get("db.port")?, "5432");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod binder;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod logging;
pub mod store;
