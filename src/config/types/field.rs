//! Type-safe manifest field paths.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted path into the manifest, pointing diagnostics at the exact
/// field that produced them.
///
/// Chain entries get an index segment so errors inside the plugin chain
/// stay addressable:
///
/// ```ignore
/// FieldPath::new("plugins").index(2).child("resolve").as_str()
/// // => "plugins[2].resolve"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Append a `.name` segment.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    /// Append a `[i]` segment for a chain element.
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_segments() {
        let path = FieldPath::new("plugins").index(2).child("resolve");
        assert_eq!(path.as_str(), "plugins[2].resolve");
    }

    #[test]
    fn test_field_path_root() {
        assert_eq!(FieldPath::new("path_prefix").as_str(), "path_prefix");
    }
}
