//! Declarative struct binding.
//!
//! Populates plain Rust structs from a [`TreeStore`](crate::store::TreeStore)
//! using per-field binding tags (`"path,omit,default(x)"`). Supported field
//! shapes are scalars, scalar lists, nested structs, optional structs,
//! positional struct lists, scalar maps and struct maps, all recursively.
//!
//! # Example
//!
//! ```rust
//! use arbor::bindable;
//! use arbor::store::TreeStore;
//! use std::collections::HashMap;
//!
//! #[derive(Default)]
//! struct Upstream {
//!     url: String,
//!     weight: u32,
//! }
//!
//! #[derive(Default)]
//! struct Gateway {
//!     listen: String,
//!     upstreams: Vec<Upstream>,
//!     routes: HashMap<String, String>,
//! }
//!
//! bindable!(Upstream {
//!     scalar url: "",
//!     scalar weight: "default(1)",
//! });
//!
//! bindable!(Gateway {
//!     scalar listen: "gateway.listen",
//!     struct_list upstreams: "gateway.upstreams",
//!     map routes: "gateway.routes,omit",
//! });
//!
//! # fn example() -> Result<(), arbor::domain::StoreError> {
//! let store = TreeStore::new();
//! store.set("gateway.listen", "0.0.0.0:443")?;
//! store.set("gateway.upstreams.0.url", "http://a")?;
//! store.set("gateway.upstreams.1.url", "http://b")?;
//! store.set("gateway.upstreams.1.weight", "3")?;
//!
//! let mut gateway = Gateway::default();
//! store.bind(&mut gateway)?;
//! assert_eq!(gateway.upstreams.len(), 2);
//! assert_eq!(gateway.upstreams[1].weight, 3);
//! assert!(gateway.routes.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod fields;
pub mod scalar;
pub mod tag;

pub use fields::{bind, Bindable, FieldBinder};
pub use scalar::ScalarValue;
pub use tag::FieldTag;
