//! Typed reads over the configuration tree
//!
//! Every accessor takes an optional textual default. `None` means no default
//! was supplied; `Some("")` is an explicit empty default and is honored. The
//! default is only consulted when the key does not resolve, and it is parsed
//! with the same rules as a stored value of that kind.
//!
//! Lists come in two shapes: a single leaf holding `;`-separated items, or a
//! subtree whose leaves are keyed `"0"`, `"1"`, ... with no gaps.

use super::tree::TreeStore;
use crate::domain::{KeyPath, StoreError};
use std::any::type_name;
use std::collections::HashMap;
use std::str::FromStr;

/// Separator between list items in a single leaf or default literal
pub const LIST_SEPARATOR: char = ';';

/// Separator between a map key and its value in a default literal
pub const MAP_PAIR_SEPARATOR: char = ':';

/// Interprets a string as a boolean
///
/// `"1"`, `"T"`, `"t"` and any casing of `"true"` are true. Everything else
/// is false; this never fails.
pub fn parse_bool(raw: &str) -> bool {
    matches!(raw, "1" | "T" | "t") || raw.eq_ignore_ascii_case("true")
}

fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(LIST_SEPARATOR).map(str::to_string).collect()
}

fn parse_map(raw: &str) -> HashMap<String, String> {
    if raw.is_empty() {
        return HashMap::new();
    }
    raw.split(LIST_SEPARATOR)
        .map(|pair| match pair.split_once(MAP_PAIR_SEPARATOR) {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

fn or_default<T>(
    result: Result<T, StoreError>,
    default: Option<&str>,
    parse: impl FnOnce(&str) -> T,
) -> Result<T, StoreError> {
    match (result, default) {
        (Err(e), Some(default)) if e.is_not_found() => Ok(parse(default)),
        (result, _) => result,
    }
}

fn parse_value<T: FromStr>(raw: &str, key: &str) -> Result<T, StoreError> {
    raw.parse()
        .map_err(|_| StoreError::conversion(key, type_name::<T>()))
}

impl TreeStore {
    /// Reads a string
    pub fn get_string(&self, key: &str, default: Option<&str>) -> Result<String, StoreError> {
        or_default(self.get(key), default, str::to_string)
    }

    /// Reads a list of strings
    ///
    /// # Errors
    ///
    /// Returns `ListGap` if a positional list skips an index.
    pub fn get_strings(
        &self,
        key: &str,
        default: Option<&str>,
    ) -> Result<Vec<String>, StoreError> {
        or_default(self.read_list(key), default, split_list)
    }

    fn read_list(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let path = KeyPath::parse(key);
        let (last, _) = path
            .split_last()
            .ok_or_else(|| StoreError::not_found(key))?;
        let parent = self.get_subtree(key)?;

        if let Some(raw) = parent.leaf(last) {
            return Ok(split_list(&raw));
        }

        let list = parent
            .child_node(last)
            .ok_or_else(|| StoreError::not_found(key))?;
        let mut items = list.leaves();
        (0..items.len())
            .map(|index| {
                items
                    .remove(&index.to_string())
                    .ok_or_else(|| StoreError::ListGap {
                        path: key.to_string(),
                        index,
                    })
            })
            .collect()
    }

    /// Reads the leaves of the subtree at `key` as a map
    ///
    /// A default literal is parsed as `;`-separated `key:value` pairs; a pair
    /// without a colon maps to an empty value.
    pub fn get_map(
        &self,
        key: &str,
        default: Option<&str>,
    ) -> Result<HashMap<String, String>, StoreError> {
        or_default(self.child(key).map(|c| c.leaves()), default, parse_map)
    }

    /// Returns the named child subtrees under `key`
    pub fn get_map_children(&self, key: &str) -> Result<HashMap<String, TreeStore>, StoreError> {
        self.child(key).map(|c| c.children())
    }

    /// Reads a boolean
    pub fn get_bool(&self, key: &str, default: Option<&str>) -> Result<bool, StoreError> {
        self.get_string(key, default).map(|raw| parse_bool(&raw))
    }

    /// Reads a list of booleans
    pub fn get_bools(&self, key: &str, default: Option<&str>) -> Result<Vec<bool>, StoreError> {
        self.get_strings(key, default)
            .map(|items| items.iter().map(|raw| parse_bool(raw)).collect())
    }

    /// Reads a value with its [`FromStr`] implementation
    ///
    /// # Errors
    ///
    /// Returns `ConversionFailed` if the stored text does not parse.
    pub fn get_parsed<T: FromStr>(&self, key: &str, default: Option<&str>) -> Result<T, StoreError> {
        let raw = self.get_string(key, default)?;
        parse_value(&raw, key)
    }

    /// Reads a list and parses every item with its [`FromStr`] implementation
    pub fn get_parsed_list<T: FromStr>(
        &self,
        key: &str,
        default: Option<&str>,
    ) -> Result<Vec<T>, StoreError> {
        self.get_strings(key, default)?
            .iter()
            .map(|raw| parse_value(raw, key))
            .collect()
    }

    pub fn get_i32(&self, key: &str, default: Option<&str>) -> Result<i32, StoreError> {
        self.get_parsed(key, default)
    }

    pub fn get_i32s(&self, key: &str, default: Option<&str>) -> Result<Vec<i32>, StoreError> {
        self.get_parsed_list(key, default)
    }

    pub fn get_i64(&self, key: &str, default: Option<&str>) -> Result<i64, StoreError> {
        self.get_parsed(key, default)
    }

    pub fn get_i64s(&self, key: &str, default: Option<&str>) -> Result<Vec<i64>, StoreError> {
        self.get_parsed_list(key, default)
    }

    pub fn get_f32(&self, key: &str, default: Option<&str>) -> Result<f32, StoreError> {
        self.get_parsed(key, default)
    }

    pub fn get_f32s(&self, key: &str, default: Option<&str>) -> Result<Vec<f32>, StoreError> {
        self.get_parsed_list(key, default)
    }

    pub fn get_f64(&self, key: &str, default: Option<&str>) -> Result<f64, StoreError> {
        self.get_parsed(key, default)
    }

    pub fn get_f64s(&self, key: &str, default: Option<&str>) -> Result<Vec<f64>, StoreError> {
        self.get_parsed_list(key, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn store() -> TreeStore {
        let store = TreeStore::new();
        store.set("test.int", "1020").unwrap();
        store.set("test.string", "my name string").unwrap();
        store.set("test.bool", "true").unwrap();
        store.set("test.float.32", "102.00").unwrap();
        store.set("test.float.64", "100.04324323").unwrap();
        store.set("comp.array.ints", "1;2;3;4;5").unwrap();
        store.set("comp.array.strings", "my;name;string").unwrap();
        store.set("comp.array.bools", "true;false").unwrap();
        store.set("comp.array.float32", "1;2;10.1").unwrap();
        store
    }

    #[test_case("1", true ; "one")]
    #[test_case("T", true ; "upper t")]
    #[test_case("t", true ; "lower t")]
    #[test_case("true", true ; "lower true")]
    #[test_case("TRUE", true ; "upper true")]
    #[test_case("True", true ; "mixed true")]
    #[test_case("0", false ; "zero")]
    #[test_case("false", false ; "lower false")]
    #[test_case("yes", false ; "yes is not truthy")]
    #[test_case("anything-else", false ; "arbitrary text")]
    #[test_case("", false ; "empty")]
    fn test_parse_bool(raw: &str, expected: bool) {
        assert_eq!(parse_bool(raw), expected);
    }

    #[test]
    fn test_scalar_accessors() {
        let store = store();
        assert_eq!(store.get_i32("test.int", None).unwrap(), 1020);
        assert_eq!(store.get_i64("test.int", None).unwrap(), 1020);
        assert_eq!(store.get_string("test.string", None).unwrap(), "my name string");
        assert!(store.get_bool("test.bool", None).unwrap());
        assert_eq!(store.get_f32("test.float.32", None).unwrap(), 102.0);
        assert_eq!(store.get_f64("test.float.64", None).unwrap(), 100.04324323);
    }

    #[test]
    fn test_delimited_lists() {
        let store = store();
        assert_eq!(store.get_i32s("comp.array.ints", None).unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            store.get_strings("comp.array.strings", None).unwrap(),
            vec!["my", "name", "string"]
        );
        assert_eq!(store.get_bools("comp.array.bools", None).unwrap(), vec![true, false]);
        assert_eq!(
            store.get_f32s("comp.array.float32", None).unwrap(),
            vec![1.0, 2.0, 10.1]
        );
    }

    #[test]
    fn test_empty_leaf_is_an_empty_list() {
        let store = TreeStore::new();
        store.set("hosts", "").unwrap();
        assert!(store.get_strings("hosts", None).unwrap().is_empty());
        assert!(store.get_i32s("hosts", None).unwrap().is_empty());
    }

    #[test]
    fn test_positional_list() {
        let store = TreeStore::new();
        store.set("a.0", "x").unwrap();
        store.set("a.1", "y").unwrap();
        assert_eq!(store.get_strings("a", None).unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_positional_list_gap_is_an_error() {
        let store = TreeStore::new();
        store.set("a.0", "x").unwrap();
        store.set("a.2", "z").unwrap();

        let err = store.get_strings("a", Some("fallback")).unwrap_err();
        assert_eq!(
            err,
            StoreError::ListGap {
                path: "a".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_default_fallbacks() {
        let store = store();
        assert_eq!(store.get_string("missing", Some("dflt")).unwrap(), "dflt");
        assert_eq!(store.get_string("missing", Some("")).unwrap(), "");
        assert!(store.get_string("missing", None).unwrap_err().is_not_found());

        assert_eq!(store.get_i32("missing", Some("7")).unwrap(), 7);
        assert!(!store.get_bool("missing", Some("foo")).unwrap());
        assert_eq!(store.get_strings("missing.list", Some("a;b")).unwrap(), vec!["a", "b"]);
        assert!(store.get_strings("missing.list", Some("")).unwrap().is_empty());
        assert_eq!(store.get_f64s("missing", Some("1.5;2")).unwrap(), vec![1.5, 2.0]);
    }

    #[test]
    fn test_default_ignored_when_present() {
        let store = store();
        assert_eq!(store.get_i32("test.int", Some("1")).unwrap(), 1020);
    }

    #[test]
    fn test_conversion_failures() {
        let store = store();
        let err = store.get_i32("test.string", None).unwrap_err();
        assert!(matches!(err, StoreError::ConversionFailed { ref path, .. } if path == "test.string"));

        assert!(store.get_i32s("comp.array.strings", None).is_err());
        assert!(store.get_f64("missing", Some("abc")).is_err());

        store.set("big", "3000000000").unwrap();
        assert!(store.get_i32("big", None).is_err());
        assert_eq!(store.get_i64("big", None).unwrap(), 3_000_000_000);
    }

    #[test]
    fn test_get_map() {
        let store = TreeStore::new();
        store.set("a.b.c", "x").unwrap();
        store.set("a.b.d", "y").unwrap();
        store.set("a.b.nested.e", "ignored").unwrap();

        let map = store.get_map("a.b", None).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["c"], "x");
        assert_eq!(map["d"], "y");
    }

    #[test]
    fn test_get_map_default() {
        let store = TreeStore::new();
        let map = store.get_map("redirects", Some("home:/index;login:/auth:sso;bare")).unwrap();
        assert_eq!(map["home"], "/index");
        assert_eq!(map["login"], "/auth:sso");
        assert_eq!(map["bare"], "");
        assert!(store.get_map("redirects", None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_map_children() {
        let store = TreeStore::new();
        store.set("map.struct.key1.field1", "a").unwrap();
        store.set("map.struct.key2.field1", "b").unwrap();

        let children = store.get_map_children("map.struct").unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children["key2"].get("field1").unwrap(), "b");
    }
}
