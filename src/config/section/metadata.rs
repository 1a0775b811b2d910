//! `[metadata]` configuration.
//!
//! Free-form display text the build pipeline injects into templates and
//! plugin contexts. No uniqueness constraints apply.

use crate::config::types::{ConfigError, FieldPath};
use serde::Serialize;
use toml::Value;

/// Site metadata (`[metadata]`).
///
/// `title` and `author` are the conventional keys; anything else the
/// author writes lands in `extra` and is handed to plugins untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataConfig {
    /// Site title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Author name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,

    /// Custom fields passed through to plugins verbatim.
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl MetadataConfig {
    /// Build from the raw `[metadata]` table.
    ///
    /// Known keys must be strings when present; leftover keys are kept
    /// in `extra`.
    pub(crate) fn from_table(
        mut table: toml::Table,
        field: &FieldPath,
    ) -> Result<Self, ConfigError> {
        let title = take_string(&mut table, field, "title")?;
        let author = take_string(&mut table, field, "author")?;

        Ok(Self {
            title,
            author,
            extra: table,
        })
    }
}

/// Remove `key` from `table`, requiring a string when present.
fn take_string(
    table: &mut toml::Table,
    field: &FieldPath,
    key: &str,
) -> Result<String, ConfigError> {
    match table.remove(key) {
        None => Ok(String::new()),
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(ConfigError::TypeMismatch {
            field: field.child(key),
            expected: "string",
            found: other.type_str(),
        }),
    }
}
