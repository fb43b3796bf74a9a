//! Layering one store over another
//!
//! The source store is snapshotted one node at a time before the receiver is
//! locked, so a merge never holds locks on two stores at once. Two threads
//! merging a pair of stores into each other cannot deadlock.

use super::tree::{Adoption, TreeStore};

impl TreeStore {
    /// Merges `other` into this store
    ///
    /// Leaves from `other` are copied when absent here, or always when
    /// `override_existing` is true. Child subtrees absent here are adopted as
    /// independent copies; subtrees present on both sides are merged
    /// recursively with the same policy.
    ///
    /// A name that is a leaf on one side and a subtree on the other keeps the
    /// receiver's shape and is logged at warn level.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::store::TreeStore;
    ///
    /// # fn example() -> Result<(), arbor::domain::StoreError> {
    /// let file = TreeStore::new();
    /// file.set("db.host", "from-file")?;
    ///
    /// let env = TreeStore::new();
    /// env.set("db.host", "from-env")?;
    /// env.set("db.port", "5432")?;
    ///
    /// file.merge_from(&env, false);
    /// assert_eq!(file.get("db.host")?, "from-file");
    /// assert_eq!(file.get("db.port")?, "5432");
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge_from(&self, other: &TreeStore, override_existing: bool) {
        self.merge_leaves(other, override_existing);

        for (name, source_child) in other.children() {
            let existing = self.child_node(&name);
            let target = match existing {
                Some(target) => target,
                None => {
                    match self.adopt_child(&name, source_child.deep_copy()) {
                        Adoption::Inserted => continue,
                        Adoption::Conflict => {
                            tracing::warn!(
                                key = %name,
                                "Skipping merged subtree that collides with an existing value"
                            );
                            continue;
                        }
                        Adoption::Existing(target) => target,
                    }
                }
            };
            target.merge_from(&source_child, override_existing);
        }
    }

    fn merge_leaves(&self, other: &TreeStore, override_existing: bool) {
        let source_leaves = other.leaves();
        if source_leaves.is_empty() {
            return;
        }

        for name in self.absorb_leaves(source_leaves, override_existing) {
            tracing::warn!(
                key = %name,
                "Skipping merged value that collides with an existing subtree"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_and_source() -> (TreeStore, TreeStore) {
        let target = TreeStore::new();
        target.set("a.x", "1").unwrap();

        let source = TreeStore::new();
        source.set("a.x", "2").unwrap();
        source.set("a.y", "3").unwrap();
        (target, source)
    }

    #[test]
    fn test_merge_without_override() {
        let (target, source) = target_and_source();
        target.merge_from(&source, false);

        assert_eq!(target.get("a.x").unwrap(), "1");
        assert_eq!(target.get("a.y").unwrap(), "3");
    }

    #[test]
    fn test_merge_with_override() {
        let (target, source) = target_and_source();
        target.merge_from(&source, true);

        assert_eq!(target.get("a.x").unwrap(), "2");
        assert_eq!(target.get("a.y").unwrap(), "3");
    }

    #[test]
    fn test_merge_adopts_missing_subtrees_as_copies() {
        let target = TreeStore::new();
        let source = TreeStore::new();
        source.set("db.primary.host", "h1").unwrap();

        target.merge_from(&source, false);
        assert_eq!(target.get("db.primary.host").unwrap(), "h1");

        source.set("db.primary.host", "h2").unwrap();
        assert_eq!(target.get("db.primary.host").unwrap(), "h1");
    }

    #[test]
    fn test_merge_root_leaves() {
        let target = TreeStore::new();
        target.set("HOME", "/root").unwrap();
        let source = TreeStore::new();
        source.set("HOME", "/home/other").unwrap();
        source.set("USER", "other").unwrap();

        target.merge_from(&source, false);
        assert_eq!(target.get("HOME").unwrap(), "/root");
        assert_eq!(target.get("USER").unwrap(), "other");
    }

    #[test]
    fn test_merge_skips_shape_conflicts() {
        let target = TreeStore::new();
        target.set("a.b", "subtree-leaf").unwrap();
        target.set("c", "leaf").unwrap();

        let source = TreeStore::new();
        source.set("a", "would-shadow").unwrap();
        source.set("c.d", "would-shadow").unwrap();

        target.merge_from(&source, true);
        assert_eq!(target.get("a.b").unwrap(), "subtree-leaf");
        assert!(target.get("a").is_err());
        assert_eq!(target.get("c").unwrap(), "leaf");
        assert!(target.get("c.d").is_err());
    }

    #[test]
    fn test_merge_into_self() {
        let store = TreeStore::new();
        store.set("a.b", "1").unwrap();
        store.merge_from(&store.clone(), true);
        assert_eq!(store.get("a.b").unwrap(), "1");
    }

    #[test]
    fn test_reciprocal_merges_do_not_deadlock() {
        let left = TreeStore::new();
        let right = TreeStore::new();
        for i in 0..50 {
            left.set(&format!("shared.l{i}"), "l").unwrap();
            right.set(&format!("shared.r{i}"), "r").unwrap();
        }

        let (l, r) = (left.clone(), right.clone());
        let first = std::thread::spawn(move || {
            for _ in 0..100 {
                l.merge_from(&r, false);
            }
        });
        let (l, r) = (left.clone(), right.clone());
        let second = std::thread::spawn(move || {
            for _ in 0..100 {
                r.merge_from(&l, false);
            }
        });
        first.join().unwrap();
        second.join().unwrap();

        assert_eq!(left.flatten().len(), 100);
        assert_eq!(right.flatten().len(), 100);
    }
}
