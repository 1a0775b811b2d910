//! Plugin chain configuration.
//!
//! The `plugins` array declares which external behavior units the build
//! pipeline registers, and in what order. An entry is either a bare name
//! or a `resolve`/`options` table:
//!
//! ```toml
//! plugins = [
//!     "catch-links",
//!     { resolve = "source-filesystem", options = { path = "content/blog", name = "posts" } },
//! ]
//! ```
//!
//! Option payloads belong to the plugin that owns them; the loader checks
//! shape only, never meaning. One key is an exception: an options table
//! may carry `plugins`, a sub-chain of the same form (markdown
//! transformers use this), which is shape-checked recursively.

use crate::config::types::{ConfigError, FieldPath};
use serde::Serialize;
use toml::Value;

/// One entry of the plugin chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PluginSpec {
    /// Bare plugin name, no options.
    Name(String),

    /// Plugin with a configuration payload.
    Configured {
        resolve: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        options: Option<toml::Table>,
    },
}

impl PluginSpec {
    /// Plugin name, regardless of entry form.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Configured { resolve, .. } => resolve,
        }
    }

    /// Options payload, if the entry carries one.
    pub fn options(&self) -> Option<&toml::Table> {
        match self {
            Self::Name(_) => None,
            Self::Configured { options, .. } => options.as_ref(),
        }
    }

    /// Sub-chain declared under `options.plugins`, if any.
    ///
    /// The shape was already checked at load time, so a present key
    /// parses again without error.
    pub fn sub_plugins(&self) -> Option<Vec<PluginSpec>> {
        let Value::Array(items) = self.options()?.get("plugins")? else {
            return None;
        };
        let mut ignored = Vec::new();
        Self::parse_chain(items, &FieldPath::new("plugins"), &mut ignored).ok()
    }

    /// Parse a whole chain, keeping declaration order.
    pub(crate) fn parse_chain(
        items: &[Value],
        field: &FieldPath,
        ignored: &mut Vec<String>,
    ) -> Result<Vec<Self>, ConfigError> {
        items
            .iter()
            .enumerate()
            .map(|(i, value)| Self::from_value(value, field.index(i), ignored))
            .collect()
    }

    /// Parse a single chain entry.
    fn from_value(
        value: &Value,
        field: FieldPath,
        ignored: &mut Vec<String>,
    ) -> Result<Self, ConfigError> {
        match value {
            Value::String(name) if name.is_empty() => Err(ConfigError::MissingField(field)),
            Value::String(name) => Ok(Self::Name(name.clone())),
            Value::Table(entry) => Self::from_entry(entry, field, ignored),
            other => Err(ConfigError::TypeMismatch {
                field,
                expected: "plugin name or table",
                found: other.type_str(),
            }),
        }
    }

    /// Parse a `resolve`/`options` table entry.
    fn from_entry(
        entry: &toml::Table,
        field: FieldPath,
        ignored: &mut Vec<String>,
    ) -> Result<Self, ConfigError> {
        let resolve = match entry.get("resolve") {
            None => return Err(ConfigError::MissingField(field.child("resolve"))),
            Some(Value::String(name)) if name.is_empty() => {
                return Err(ConfigError::MissingField(field.child("resolve")));
            }
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(ConfigError::TypeMismatch {
                    field: field.child("resolve"),
                    expected: "string",
                    found: other.type_str(),
                });
            }
        };

        let options = match entry.get("options") {
            None => None,
            Some(Value::Table(options)) => {
                Self::check_sub_chain(options, &field.child("options"), ignored)?;
                Some(options.clone())
            }
            Some(other) => {
                return Err(ConfigError::TypeMismatch {
                    field: field.child("options"),
                    expected: "table",
                    found: other.type_str(),
                });
            }
        };

        for key in entry.keys() {
            if key != "resolve" && key != "options" {
                ignored.push(field.child(key).as_str().to_string());
            }
        }

        Ok(Self::Configured { resolve, options })
    }

    /// Shape-check a nested `plugins` sub-chain inside an options table.
    fn check_sub_chain(
        options: &toml::Table,
        field: &FieldPath,
        ignored: &mut Vec<String>,
    ) -> Result<(), ConfigError> {
        match options.get("plugins") {
            None => Ok(()),
            Some(Value::Array(items)) => {
                Self::parse_chain(items, &field.child("plugins"), ignored).map(|_| ())
            }
            Some(other) => Err(ConfigError::TypeMismatch {
                field: field.child("plugins"),
                expected: "array",
                found: other.type_str(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, test_parse_manifest};

    #[test]
    fn test_bare_name() {
        let config = test_parse_manifest("plugins = [\"offline\"]");
        assert_eq!(config.plugins, [PluginSpec::Name("offline".into())]);
        assert_eq!(config.plugins[0].name(), "offline");
        assert!(config.plugins[0].options().is_none());
    }

    #[test]
    fn test_empty_bare_name() {
        let result = SiteConfig::from_str("path_prefix = \"/\"\nplugins = [\"\"]");
        match result {
            Err(ConfigError::MissingField(field)) => assert_eq!(field.as_str(), "plugins[0]"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_resolve() {
        let result =
            SiteConfig::from_str("path_prefix = \"/\"\nplugins = [{ options = { a = 1 } }]");
        match result {
            Err(ConfigError::MissingField(field)) => {
                assert_eq!(field.as_str(), "plugins[0].resolve");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_resolve() {
        let result = SiteConfig::from_str("path_prefix = \"/\"\nplugins = [{ resolve = \"\" }]");
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_resolve_wrong_type() {
        let result = SiteConfig::from_str("path_prefix = \"/\"\nplugins = [{ resolve = 1 }]");
        match result {
            Err(ConfigError::TypeMismatch {
                field,
                expected,
                found,
            }) => {
                assert_eq!(field.as_str(), "plugins[0].resolve");
                assert_eq!(expected, "string");
                assert_eq!(found, "integer");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_entry_wrong_type() {
        let result = SiteConfig::from_str("path_prefix = \"/\"\nplugins = [3]");
        match result {
            Err(ConfigError::TypeMismatch {
                field, expected, ..
            }) => {
                assert_eq!(field.as_str(), "plugins[0]");
                assert_eq!(expected, "plugin name or table");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_options_wrong_type() {
        let result = SiteConfig::from_str(
            "path_prefix = \"/\"\nplugins = [{ resolve = \"manifest\", options = 3 }]",
        );
        match result {
            Err(ConfigError::TypeMismatch { field, .. }) => {
                assert_eq!(field.as_str(), "plugins[0].options");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_options_opaque() {
        let config = test_parse_manifest(
            "plugins = [{ resolve = \"manifest\", options = { background_color = \"white\", theme_color = \"#002635\", orientation = \"portrait\", legacy = false } }]",
        );
        let options = config.plugins[0].options().unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options["theme_color"].as_str(), Some("#002635"));
        assert_eq!(options["legacy"].as_bool(), Some(false));
    }

    #[test]
    fn test_sub_chain_preserved() {
        let config = test_parse_manifest(
            "plugins = [{ resolve = \"transform-markdown\", options = { plugins = [\"copy-linked-files\", { resolve = \"images\", options = { link_to_original = false } }, \"smartypants\"] } }]",
        );
        let sub = config.plugins[0].sub_plugins().unwrap();
        assert_eq!(sub.len(), 3);
        let names: Vec<_> = sub.iter().map(PluginSpec::name).collect();
        assert_eq!(names, ["copy-linked-files", "images", "smartypants"]);
    }

    #[test]
    fn test_no_sub_chain() {
        let config = test_parse_manifest(
            "plugins = [\"offline\", { resolve = \"google-analytics\", options = { tracking_id = \"UA-X\" } }]",
        );
        assert!(config.plugins[0].sub_plugins().is_none());
        assert!(config.plugins[1].sub_plugins().is_none());
    }

    #[test]
    fn test_sub_chain_not_array() {
        let result = SiteConfig::from_str(
            "path_prefix = \"/\"\nplugins = [{ resolve = \"transform-markdown\", options = { plugins = \"smartypants\" } }]",
        );
        match result {
            Err(ConfigError::TypeMismatch {
                field,
                expected,
                found,
            }) => {
                assert_eq!(field.as_str(), "plugins[0].options.plugins");
                assert_eq!(expected, "array");
                assert_eq!(found, "string");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_chain_checked_recursively() {
        let result = SiteConfig::from_str(
            "path_prefix = \"/\"\nplugins = [{ resolve = \"transform-markdown\", options = { plugins = [\"smartypants\", { options = { x = 1 } }] } }]",
        );
        match result {
            Err(ConfigError::MissingField(field)) => {
                assert_eq!(field.as_str(), "plugins[0].options.plugins[1].resolve");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_entry_key_collected() {
        let (_, ignored) = SiteConfig::parse_with_ignored(
            "path_prefix = \"/\"\nplugins = [{ resolve = \"offline\", option = 1 }]",
        )
        .unwrap();
        assert_eq!(ignored, ["plugins[0].option"]);
    }
}
