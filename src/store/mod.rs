//! The hierarchical configuration store.
//!
//! A [`TreeStore`] is a tree of nodes addressed by dotted keys. Each node
//! holds leaf scalars and named child subtrees. Providers fill a store with
//! [`TreeStore::set`]; readers use the typed accessors (`get_string`,
//! `get_strings`, `get_map`, `get_bool`, `get_i32`, ...) or bind whole structs
//! through [`crate::binder`].
//!
//! # Conventions
//!
//! - **Lists** are either one leaf of `;`-separated items or a subtree whose
//!   leaves are keyed `"0"`, `"1"`, ... without gaps.
//! - **Maps** are a subtree whose leaf mapping is the map.
//! - A name is either a leaf or a subtree at its level, never both.
//!
//! # Example
//!
//! ```rust
//! use arbor::store::TreeStore;
//!
//! # fn example() -> Result<(), arbor::domain::StoreError> {
//! let store = TreeStore::new();
//! store.set("servers.0", "alpha")?;
//! store.set("servers.1", "beta")?;
//! store.set("limits.rps", "250")?;
//!
//! assert_eq!(store.get_strings("servers", None)?, vec!["alpha", "beta"]);
//! assert_eq!(store.get_i64("limits.rps", None)?, 250);
//! assert_eq!(store.get_i64("limits.burst", Some("500"))?, 500);
//! # Ok(())
//! # }
//! ```

pub mod accessors;
pub mod merge;
pub mod tree;

pub use accessors::parse_bool;
pub use tree::TreeStore;
