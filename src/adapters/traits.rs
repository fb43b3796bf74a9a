//! Provider abstraction
//!
//! A provider knows one way of producing a populated [`TreeStore`]: reading a
//! flat file, snapshotting the process environment, or listing a remote key
//! directory.

use crate::domain::Result;
use crate::store::TreeStore;
use async_trait::async_trait;

/// Source of a configuration tree
///
/// Implementations load eagerly on every call; caching, if wanted, belongs to
/// the caller (see [`crate::context`]).
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short scheme name used in provider selection strings
    fn name(&self) -> &'static str;

    /// Produce a populated store
    ///
    /// # Errors
    ///
    /// Returns an error if the backing source cannot be read or holds entries
    /// that cannot be stored.
    async fn load(&self) -> Result<TreeStore>;
}
