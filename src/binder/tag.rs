//! Binding metadata grammar
//!
//! A tag is a comma-separated list of tokens:
//!
//! - `omit` marks the field optional: a missing source path leaves it as is
//! - `default(<literal>)` supplies a textual fallback
//! - anything else overrides the source path (the last one wins)
//!
//! Tokens are matched case-insensitively and path overrides are lowercased, to
//! line up with the lowercased keys the file provider produces. The default
//! literal keeps its case.

const DEFAULT_PREFIX: &str = "default(";

/// Parsed binding metadata for one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    /// Source path override, relative to the parent path
    pub path: Option<String>,
    /// Missing source path is not an error
    pub omit: bool,
    /// Textual fallback fed to the field's accessor
    pub default: Option<String>,
}

impl FieldTag {
    /// Parses a tag string
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::binder::FieldTag;
    ///
    /// let tag = FieldTag::parse("comp.string.def,default(defaultValue)");
    /// assert_eq!(tag.path.as_deref(), Some("comp.string.def"));
    /// assert_eq!(tag.default.as_deref(), Some("defaultValue"));
    /// assert!(!tag.omit);
    /// ```
    pub fn parse(tag: &str) -> Self {
        let mut parsed = Self::default();
        for token in tag.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let lowered = token.to_ascii_lowercase();
            if lowered == "omit" {
                parsed.omit = true;
            } else if lowered.starts_with(DEFAULT_PREFIX) {
                let literal = &token[DEFAULT_PREFIX.len()..];
                let literal = literal.strip_suffix(')').unwrap_or(literal);
                parsed.default = Some(literal.to_string());
            } else {
                parsed.path = Some(token.to_lowercase());
            }
        }
        parsed
    }

    /// Returns the path segment to bind from: the override or the field name
    pub fn source<'a>(&'a self, field_name: &'a str) -> &'a str {
        self.path.as_deref().unwrap_or(field_name)
    }
}
