//! Configuration sources.
//!
//! Each adapter implements [`Provider`] and produces a populated
//! [`TreeStore`](crate::store::TreeStore):
//!
//! - [`file`] - flat `key = value` files
//! - [`env`] - a snapshot of the process environment
//! - [`etcd`] - a remote key directory listed over the etcd v2 HTTP API
//!
//! [`factory`] turns a `<scheme>::<context>` selection string into the right
//! provider.
//!
//! ```rust,no_run
//! use arbor::adapters::factory::load_store;
//! use arbor::config::ArborSettings;
//!
//! # async fn example() -> arbor::domain::Result<()> {
//! let store = load_store("file::./config.ini", &ArborSettings::default()).await?;
//! let port = store.get_i32("server.port", Some("8080"))?;
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod etcd;
pub mod factory;
pub mod file;
pub mod traits;

pub use env::EnvProvider;
pub use etcd::EtcdProvider;
pub use factory::{create_provider, load_store, ProviderKind, ProviderSpec};
pub use file::FileProvider;
pub use traits::Provider;
