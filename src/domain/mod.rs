//! Domain types shared by every layer of Arbor.
//!
//! - **Key addressing** ([`KeyPath`]) turns dotted keys into path segments
//! - **Error types** ([`StoreError`], [`ArborError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Store-level operations return `std::result::Result<T, StoreError>`; the
//! `?` operator lifts them into [`ArborError`]:
//!
//! ```rust
//! use arbor::domain::Result;
//! use arbor::store::TreeStore;
//!
//! fn example() -> Result<String> {
//!     let store = TreeStore::new();
//!     store.set("db.host", "localhost")?;
//!     Ok(store.get("db.host")?)
//! }
//! ```

pub mod errors;
pub mod path;
pub mod result;

pub use errors::{ArborError, StoreError};
pub use path::KeyPath;
pub use result::Result;
