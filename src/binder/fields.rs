//! Struct binding
//!
//! A type opts in by implementing [`Bindable`]: its `bind_fields` makes one
//! [`FieldBinder`] call per field, naming the field, its binding tag and its
//! kind through the method chosen. That sequence of calls is the type's field
//! descriptor table. The [`bindable!`](crate::bindable) macro writes it from a
//! compact declaration.
//!
//! Effective paths are built as `parent.segment`, where the segment is the
//! tag's path override or the field name. Binding stops at the first failing
//! field; fields already assigned keep their new values.

use super::scalar::ScalarValue;
use super::tag::FieldTag;
use crate::domain::{KeyPath, StoreError};
use crate::store::TreeStore;
use std::collections::{BTreeMap, HashMap};

/// A composite that can be populated from a [`TreeStore`]
pub trait Bindable {
    /// Binds every field through `fields`
    fn bind_fields(&mut self, fields: &mut FieldBinder<'_>) -> Result<(), StoreError>;
}

impl<T: Bindable + ?Sized> Bindable for Box<T> {
    fn bind_fields(&mut self, fields: &mut FieldBinder<'_>) -> Result<(), StoreError> {
        (**self).bind_fields(fields)
    }
}

/// Walks one composite's fields against a store
pub struct FieldBinder<'a> {
    store: &'a TreeStore,
    parent: String,
}

impl<'a> FieldBinder<'a> {
    /// Creates a binder rooted at `store` with an empty parent path
    pub fn new(store: &'a TreeStore) -> Self {
        Self::with_parent(store, String::new())
    }

    fn with_parent(store: &'a TreeStore, parent: String) -> Self {
        Self { store, parent }
    }

    /// The path prefix fields of the current composite resolve under
    pub fn parent(&self) -> &str {
        &self.parent
    }

    fn resolve(&self, name: &str, tag: &str) -> (String, FieldTag) {
        let tag = FieldTag::parse(tag);
        let path = KeyPath::join(&self.parent, tag.source(name));
        (path, tag)
    }

    /// Skips subtree-shaped fields tagged `omit` whose subtree is absent
    fn absent_and_omitted(&self, path: &str, tag: &FieldTag) -> bool {
        tag.omit && !self.store.has_child(path)
    }

    /// Binds a scalar field (string, bool, integer or float)
    pub fn scalar<T: ScalarValue>(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut T,
    ) -> Result<(), StoreError> {
        let (path, tag) = self.resolve(name, tag);
        let value = T::read(self.store, &path, tag.default.as_deref());
        if let Some(value) = settle(value, &path, &tag)? {
            *slot = value;
        }
        Ok(())
    }

    /// Binds a list of scalars, delimited or positional
    pub fn list<T: ScalarValue>(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut Vec<T>,
    ) -> Result<(), StoreError> {
        let (path, tag) = self.resolve(name, tag);
        let value = T::read_list(self.store, &path, tag.default.as_deref());
        if let Some(value) = settle(value, &path, &tag)? {
            *slot = value;
        }
        Ok(())
    }

    /// Binds a nested composite; its fields resolve under this field's path
    pub fn nested<T: Bindable + ?Sized>(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut T,
    ) -> Result<(), StoreError> {
        let (path, tag) = self.resolve(name, tag);
        if self.absent_and_omitted(&path, &tag) {
            return Ok(());
        }
        let result = slot.bind_fields(&mut FieldBinder::with_parent(self.store, path.clone()));
        settle(result, &path, &tag).map(|_| ())
    }

    /// Binds an optional composite, allocating it only if currently unset
    pub fn optional<T: Bindable + Default>(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut Option<T>,
    ) -> Result<(), StoreError> {
        let (path, parsed) = self.resolve(name, tag);
        if self.absent_and_omitted(&path, &parsed) {
            return Ok(());
        }
        let target = slot.get_or_insert_with(T::default);
        self.nested(name, tag, target)
    }

    /// Binds a positional list of composites
    ///
    /// Children of the subtree at this field's path must be keyed `"0"` to
    /// `"N-1"`; element `i` binds under `path.i`.
    pub fn struct_list<T: Bindable + Default>(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut Vec<T>,
    ) -> Result<(), StoreError> {
        let (path, tag) = self.resolve(name, tag);
        if self.absent_and_omitted(&path, &tag) {
            return Ok(());
        }
        let entries = self.store.child(&path)?.children();

        let mut items = Vec::with_capacity(entries.len());
        for index in 0..entries.len() {
            let segment = index.to_string();
            if !entries.contains_key(&segment) {
                return Err(StoreError::ListGap { path, index });
            }
            let mut item = T::default();
            let element_path = KeyPath::join(&path, &segment);
            item.bind_fields(&mut FieldBinder::with_parent(self.store, element_path))?;
            items.push(item);
        }

        tracing::trace!(path = %path, count = items.len(), "Bound struct list");
        *slot = items;
        Ok(())
    }

    /// Binds a map of scalars from the leaves of this field's subtree
    pub fn map(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut HashMap<String, String>,
    ) -> Result<(), StoreError> {
        let (path, tag) = self.resolve(name, tag);
        if self.absent_and_omitted(&path, &tag) {
            return Ok(());
        }
        let value = self.store.get_map(&path, tag.default.as_deref());
        if let Some(value) = settle(value, &path, &tag)? {
            *slot = value;
        }
        Ok(())
    }

    /// Binds a map of composites, one per child subtree of this field's path
    ///
    /// Each element binds with its child subtree as the new root, so its
    /// fields resolve relative to that subtree.
    pub fn struct_map<T: Bindable + Default>(
        &mut self,
        name: &str,
        tag: &str,
        slot: &mut HashMap<String, T>,
    ) -> Result<(), StoreError> {
        let (path, tag) = self.resolve(name, tag);
        if self.absent_and_omitted(&path, &tag) {
            return Ok(());
        }
        let entries: BTreeMap<String, TreeStore> =
            self.store.get_map_children(&path)?.into_iter().collect();

        let mut items = HashMap::with_capacity(entries.len());
        for (key, subtree) in entries {
            let mut item = T::default();
            item.bind_fields(&mut FieldBinder::new(&subtree))
                .map_err(|source| StoreError::Nested {
                    path: KeyPath::join(&path, &key),
                    source: Box::new(source),
                })?;
            items.insert(key, item);
        }

        *slot = items;
        Ok(())
    }
}

/// Applies the omit policy to an accessor result
///
/// `Ok(None)` means the field is left untouched.
fn settle<T>(
    result: Result<T, StoreError>,
    path: &str,
    tag: &FieldTag,
) -> Result<Option<T>, StoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if tag.omit && e.is_not_found() => {
            tracing::trace!(path, "Omitted field has no value");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Populates `target` from `store`
///
/// # Examples
///
/// ```
/// use arbor::binder::{bind, Bindable, FieldBinder};
/// use arbor::domain::StoreError;
/// use arbor::store::TreeStore;
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Bindable for Server {
///     fn bind_fields(&mut self, fields: &mut FieldBinder<'_>) -> Result<(), StoreError> {
///         fields.scalar("host", "server.host", &mut self.host)?;
///         fields.scalar("port", "server.port,default(8080)", &mut self.port)?;
///         Ok(())
///     }
/// }
///
/// # fn example() -> Result<(), StoreError> {
/// let store = TreeStore::new();
/// store.set("server.host", "0.0.0.0")?;
///
/// let mut server = Server::default();
/// bind(&store, &mut server)?;
/// assert_eq!(server.host, "0.0.0.0");
/// assert_eq!(server.port, 8080);
/// # Ok(())
/// # }
/// ```
pub fn bind<T: Bindable + ?Sized>(store: &TreeStore, target: &mut T) -> Result<(), StoreError> {
    target.bind_fields(&mut FieldBinder::new(store))
}

impl TreeStore {
    /// Populates `target` from this store; see [`bind`]
    pub fn bind<T: Bindable + ?Sized>(&self, target: &mut T) -> Result<(), StoreError> {
        bind(self, target)
    }
}

/// Implements [`Bindable`] from a field table
///
/// Each entry is `kind field: "tag"`, where `kind` is one of the
/// [`FieldBinder`] methods: `scalar`, `list`, `nested`, `optional`,
/// `struct_list`, `map` or `struct_map`. An empty tag binds from the field
/// name.
///
/// ```
/// use arbor::bindable;
/// use std::collections::HashMap;
///
/// #[derive(Default)]
/// struct Limits {
///     rps: u32,
/// }
///
/// #[derive(Default)]
/// struct Service {
///     name: String,
///     peers: Vec<String>,
///     labels: HashMap<String, String>,
///     limits: Limits,
/// }
///
/// bindable!(Limits {
///     scalar rps: "default(100)",
/// });
///
/// bindable!(Service {
///     scalar name: "service.name",
///     list peers: "service.peers,omit",
///     map labels: "service.labels,omit",
///     nested limits: "service.limits",
/// });
/// ```
#[macro_export]
macro_rules! bindable {
    ($ty:ty { $($kind:ident $field:ident : $tag:expr),* $(,)? }) => {
        impl $crate::binder::Bindable for $ty {
            fn bind_fields(
                &mut self,
                fields: &mut $crate::binder::FieldBinder<'_>,
            ) -> ::std::result::Result<(), $crate::domain::StoreError> {
                $( fields.$kind(stringify!($field), $tag, &mut self.$field)?; )*
                Ok(())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Inline {
        name: String,
        flags: Vec<bool>,
    }

    crate::bindable!(Inline {
        scalar name: "struct.string",
        list flags: "struct.bools",
    });

    #[derive(Debug, Default)]
    struct Root {
        count: i64,
        skipped: bool,
        fallback: String,
        inline: Option<Inline>,
        items: Vec<Inline>,
    }

    crate::bindable!(Root {
        scalar count: "comp.count",
        scalar skipped: "comp.skipped,omit",
        scalar fallback: "comp.fallback,default(defaultValue)",
        optional inline: "comp",
        struct_list items: "comp.array,omit",
    });

    #[test]
    fn test_bind_scalars_and_optional() {
        let store = TreeStore::new();
        store.set("comp.count", "55").unwrap();
        store.set("comp.struct.string", "ReString").unwrap();
        store.set("comp.struct.bools", "true;false").unwrap();

        let mut root = Root::default();
        store.bind(&mut root).unwrap();

        assert_eq!(root.count, 55);
        assert!(!root.skipped);
        assert_eq!(root.fallback, "defaultValue");
        let inline = root.inline.unwrap();
        assert_eq!(inline.name, "ReString");
        assert_eq!(inline.flags, vec![true, false]);
        assert!(root.items.is_empty());
    }

    #[test]
    fn test_missing_required_field_aborts() {
        let store = TreeStore::new();
        let mut root = Root::default();
        let err = bind(&store, &mut root).unwrap_err();
        assert_eq!(err, StoreError::not_found("comp.count"));
    }

    #[test]
    fn test_earlier_fields_are_not_rolled_back() {
        let store = TreeStore::new();
        store.set("comp.count", "7").unwrap();
        store.set("comp.struct.bools", "true").unwrap();

        let mut root = Root::default();
        let err = bind(&store, &mut root).unwrap_err();
        assert_eq!(err, StoreError::not_found("comp.struct.string"));
        assert_eq!(root.count, 7);
        assert_eq!(root.fallback, "defaultValue");
    }

    #[test]
    fn test_parent_prefix() {
        let store = TreeStore::new();
        let binder = FieldBinder::new(&store);
        assert_eq!(binder.parent(), "");
        assert_eq!(binder.resolve("host", "").0, "host");
        assert_eq!(binder.resolve("host", "db.addr").0, "db.addr");

        let nested = FieldBinder::with_parent(&store, "svc".to_string());
        assert_eq!(nested.resolve("host", "").0, "svc.host");
    }

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        a: String,
        b: String,
    }

    crate::bindable!(Pair {
        scalar a: "",
        scalar b: "b,omit",
    });

    #[derive(Debug, Default)]
    struct Holder {
        inner: Option<Pair>,
    }

    crate::bindable!(Holder {
        optional inner: "x",
    });

    #[test]
    fn test_optional_keeps_existing_target() {
        let store = TreeStore::new();
        store.set("x.a", "new").unwrap();

        let mut holder = Holder {
            inner: Some(Pair {
                a: "old".to_string(),
                b: "kept".to_string(),
            }),
        };
        store.bind(&mut holder).unwrap();
        assert_eq!(
            holder.inner,
            Some(Pair {
                a: "new".to_string(),
                b: "kept".to_string(),
            })
        );

        let mut empty = Holder::default();
        store.bind(&mut empty).unwrap();
        assert_eq!(
            empty.inner,
            Some(Pair {
                a: "new".to_string(),
                b: String::new(),
            })
        );
    }

    #[test]
    fn test_boxed_target() {
        let store = TreeStore::new();
        store.set("struct.string", "boxed").unwrap();
        store.set("struct.bools", "1").unwrap();

        let mut target: Box<Inline> = Box::default();
        bind(&store, &mut target).unwrap();
        assert_eq!(target.name, "boxed");
        assert_eq!(target.flags, vec![true]);
    }
}
