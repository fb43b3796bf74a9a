//! The hierarchical configuration tree
//!
//! Every node keeps two maps: leaf scalars and named child subtrees. Each map
//! has its own lock. Operations that walk several levels lock one node at a
//! time and release it before moving to the child, so no lock is ever held
//! across two tree levels.
//!
//! Within a single node the children lock is always taken before the leaves
//! lock when both are needed.

use crate::domain::{KeyPath, StoreError};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Outcome of offering a subtree to a node during a merge
pub(super) enum Adoption {
    Inserted,
    Conflict,
    Existing(TreeStore),
}

#[derive(Default)]
struct Node {
    leaves: RwLock<HashMap<String, String>>,
    children: RwLock<HashMap<String, TreeStore>>,
}

/// A shared handle to a configuration tree node
///
/// Cloning the handle is cheap and both clones address the same node. Use
/// [`TreeStore::deep_copy`] for an independent tree.
///
/// # Examples
///
/// ```
/// use arbor::store::TreeStore;
///
/// # fn example() -> Result<(), arbor::domain::StoreError> {
/// let store = TreeStore::new();
/// store.set("db.primary.host", "10.0.0.1")?;
/// store.set("db.primary.port", "5432")?;
///
/// assert_eq!(store.get("db.primary.host")?, "10.0.0.1");
/// assert_eq!(store.get_i32("db.primary.port", None)?, 5432);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct TreeStore {
    node: Arc<Node>,
}

impl TreeStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under the dotted `key`
    ///
    /// Missing intermediate subtrees are created. Wrapping double quotes around
    /// the value are stripped.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` for an empty key and `Conflict` if a segment is
    /// already used with the other role (leaf vs. subtree) at its level.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = KeyPath::parse(key);
        let value = value.trim_matches('"');
        tracing::trace!(path = key, "Setting configuration value");
        self.set_in(path.segments(), value, key)
    }

    fn set_in(&self, segments: &[String], value: &str, key: &str) -> Result<(), StoreError> {
        match segments {
            [] => Err(StoreError::EmptyPath),
            [last] => {
                let children = self.node.children.read();
                if children.contains_key(last) {
                    return Err(StoreError::Conflict {
                        path: key.to_string(),
                        existing: "subtree",
                    });
                }
                self.node
                    .leaves
                    .write()
                    .insert(last.clone(), value.to_string());
                Ok(())
            }
            [first, rest @ ..] => {
                let child = {
                    let mut children = self.node.children.write();
                    match children.get(first) {
                        Some(child) => child.clone(),
                        None => {
                            if self.node.leaves.read().contains_key(first) {
                                return Err(StoreError::Conflict {
                                    path: key.to_string(),
                                    existing: "leaf",
                                });
                            }
                            let child = TreeStore::new();
                            children.insert(first.clone(), child.clone());
                            child
                        }
                    }
                };
                child.set_in(rest, value, key)
            }
        }
    }

    /// Stores a leaf directly on this node, without path parsing
    ///
    /// Used for keys that must stay a single segment even when they contain
    /// dots, such as environment variable names.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if a subtree with the same name exists.
    pub fn set_leaf(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let children = self.node.children.read();
        if children.contains_key(name) {
            return Err(StoreError::Conflict {
                path: name.to_string(),
                existing: "subtree",
            });
        }
        self.node
            .leaves
            .write()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Returns the leaf scalar addressed by `key`
    pub fn get(&self, key: &str) -> Result<String, StoreError> {
        let path = KeyPath::parse(key);
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| StoreError::not_found(key))?;
        self.descend(parents)
            .and_then(|parent| parent.leaf(last))
            .ok_or_else(|| StoreError::not_found(key))
    }

    /// Returns the parent node of the final segment of `key`
    ///
    /// The returned node holds both the leaf and the subtree that the final
    /// segment may name, which is what list and map readers need.
    pub fn get_subtree(&self, key: &str) -> Result<TreeStore, StoreError> {
        let path = KeyPath::parse(key);
        let (_, parents) = path
            .split_last()
            .ok_or_else(|| StoreError::not_found(key))?;
        self.descend(parents)
            .ok_or_else(|| StoreError::not_found(key))
    }

    /// Returns the subtree addressed by the full `key`
    pub fn child(&self, key: &str) -> Result<TreeStore, StoreError> {
        let path = KeyPath::parse(key);
        if path.is_empty() {
            return Err(StoreError::not_found(key));
        }
        self.descend(path.segments())
            .ok_or_else(|| StoreError::not_found(key))
    }

    /// Returns true if `key` addresses a subtree
    pub fn has_child(&self, key: &str) -> bool {
        self.child(key).is_ok()
    }

    /// Removes the leaf addressed by `key`
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = KeyPath::parse(key);
        let (last, _) = path
            .split_last()
            .ok_or_else(|| StoreError::not_found(key))?;
        let parent = self.get_subtree(key)?;
        let removed = parent.node.leaves.write().remove(last);
        match removed {
            Some(_) => {
                tracing::trace!(path = key, "Deleted configuration value");
                Ok(())
            }
            None => Err(StoreError::not_found(key)),
        }
    }

    /// Walks child subtrees one level at a time
    pub(crate) fn descend(&self, segments: &[String]) -> Option<TreeStore> {
        let mut current = self.clone();
        for segment in segments {
            let next = current.child_node(segment)?;
            current = next;
        }
        Some(current)
    }

    /// Returns a single leaf of this node
    pub(crate) fn leaf(&self, name: &str) -> Option<String> {
        self.node.leaves.read().get(name).cloned()
    }

    /// Returns a single direct child of this node
    pub(crate) fn child_node(&self, name: &str) -> Option<TreeStore> {
        self.node.children.read().get(name).cloned()
    }

    /// Copies `entries` into this node's leaves
    ///
    /// Names already used by a child subtree are skipped and returned.
    pub(super) fn absorb_leaves(
        &self,
        entries: HashMap<String, String>,
        override_existing: bool,
    ) -> Vec<String> {
        let children = self.node.children.read();
        let mut leaves = self.node.leaves.write();
        let mut skipped = Vec::new();
        for (name, value) in entries {
            if children.contains_key(&name) {
                skipped.push(name);
                continue;
            }
            if override_existing || !leaves.contains_key(&name) {
                leaves.insert(name, value);
            }
        }
        skipped
    }

    /// Inserts `adopted` as child `name` unless the name is already taken
    pub(super) fn adopt_child(&self, name: &str, adopted: TreeStore) -> Adoption {
        let mut children = self.node.children.write();
        if let Some(existing) = children.get(name) {
            return Adoption::Existing(existing.clone());
        }
        if self.node.leaves.read().contains_key(name) {
            return Adoption::Conflict;
        }
        children.insert(name.to_string(), adopted);
        Adoption::Inserted
    }

    /// Snapshot of this node's leaf scalars
    pub fn leaves(&self) -> HashMap<String, String> {
        self.node.leaves.read().clone()
    }

    /// Snapshot of this node's direct children
    pub fn children(&self) -> HashMap<String, TreeStore> {
        self.node.children.read().clone()
    }

    /// Returns true if the node has neither leaves nor children
    pub fn is_empty(&self) -> bool {
        self.node.children.read().is_empty() && self.node.leaves.read().is_empty()
    }

    /// Returns true if both handles address the same node
    pub fn ptr_eq(&self, other: &TreeStore) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Builds an independent copy of the whole tree below this node
    pub fn deep_copy(&self) -> TreeStore {
        let copy = TreeStore::new();
        *copy.node.leaves.write() = self.leaves();
        let children = self
            .children()
            .into_iter()
            .map(|(name, child)| (name, child.deep_copy()))
            .collect();
        *copy.node.children.write() = children;
        copy
    }

    /// Flattens the tree into fully-qualified dotted keys
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut BTreeMap<String, String>) {
        for (name, value) in self.leaves() {
            out.insert(KeyPath::join(prefix, &name), value);
        }
        for (name, child) in self.children() {
            child.flatten_into(&KeyPath::join(prefix, &name), out);
        }
    }
}

impl fmt::Display for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.flatten() {
            writeln!(f, "{key:<10} = {value}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.flatten()).finish()
    }
}
