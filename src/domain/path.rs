//! Dotted key addressing
//!
//! A key such as `db.primary.host` addresses the leaf `host` under the
//! subtrees `db` and `primary`. When the final segment itself needs literal
//! dots it can be quoted: `hosts."api.example.com"` has the two segments
//! `hosts` and `api.example.com`.

use std::fmt;

/// An ordered sequence of path segments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parses a dotted key into segments
    ///
    /// If the key contains exactly two `"` characters and ends with one, the
    /// quoted span becomes the last segment verbatim. Everything before it is
    /// split on `.` as usual. An empty key yields no segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::domain::KeyPath;
    ///
    /// let path = KeyPath::parse(r#"hosts."api.example.com""#);
    /// assert_eq!(path.segments(), ["hosts", "api.example.com"]);
    /// ```
    pub fn parse(key: &str) -> Self {
        if key.is_empty() {
            return Self::default();
        }

        if key.matches('"').count() == 2 && key.ends_with('"') {
            let body = &key[..key.len() - 1];
            if let Some(open) = body.rfind('"') {
                let prefix = body[..open].trim_end_matches('.');
                let mut segments: Vec<String> = if prefix.is_empty() {
                    Vec::new()
                } else {
                    prefix.split('.').map(str::to_string).collect()
                };
                segments.push(body[open + 1..].to_string());
                return Self { segments };
            }
        }

        Self {
            segments: key.split('.').map(str::to_string).collect(),
        }
    }

    /// Joins a parent key and a child key with a dot
    ///
    /// An empty parent yields the child unchanged; trailing dots on the
    /// parent are dropped.
    pub fn join(parent: &str, child: &str) -> String {
        let parent = parent.trim_end_matches('.');
        if parent.is_empty() {
            child.to_string()
        } else {
            format!("{parent}.{child}")
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Splits into the parent segments and the final segment
    pub fn split_last(&self) -> Option<(&String, &[String])> {
        self.segments.split_last()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
