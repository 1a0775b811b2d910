//! Site manifest management for `gantry.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Manifest section definitions
//! │   ├── metadata   # [metadata]
//! │   └── plugin     # plugins chain
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Keys
//!
//! | Key           | Purpose                                     |
//! |---------------|---------------------------------------------|
//! | `path_prefix` | URL prefix the site is deployed under       |
//! | `plugins`     | Ordered chain of build-pipeline plugins     |
//! | `[metadata]`  | Display text (title, author, custom fields) |
//!
//! The record is built once, at startup, by an explicit [`SiteConfig::load`]
//! call, and stays immutable for the rest of the run. Loading either
//! returns a complete record or fails; partial manifests are never
//! observed.

pub mod section;
pub mod types;
mod util;

pub use section::{MetadataConfig, PluginSpec};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_manifest;

use crate::{cli::Cli, debug, log};
use anyhow::{Result, bail};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use toml::Value;

// ============================================================================
// root manifest
// ============================================================================

/// Root manifest structure representing gantry.toml
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConfig {
    /// Absolute path to the manifest file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// URL path prefix for deployed output (e.g., "/" or "/my-project").
    pub path_prefix: String,

    /// Ordered plugin chain, preserved exactly as authored.
    pub plugins: Vec<PluginSpec>,

    /// Site display metadata.
    pub metadata: MetadataConfig,
}

impl SiteConfig {
    /// Load the manifest for the current invocation.
    ///
    /// Searches upward from cwd for the manifest, parses it, then
    /// validates the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_manifest(&cli.config) else {
            log!(
                "error";
                "manifest '{}' not found. Run 'gantry init' to create one.",
                cli.config.display()
            );
            std::process::exit(1);
        };

        let config = Self::from_path(&config_path)?;
        config.validate()?;

        debug!(
            "config";
            "loaded {} from {}",
            crate::utils::plural_count(config.plugins.len(), "plugin"),
            config_path.display()
        );

        Ok(config)
    }

    /// Load the manifest from a file path with unknown field detection.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown manifest fields");
            }
        }

        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Parse a manifest from TOML text.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse_with_ignored(content).map(|(config, _)| config)
    }

    /// Parse TOML text, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut ignored = Vec::new();
        let config = Self::from_table(table, &mut ignored)?;
        Ok((config, ignored))
    }

    /// Build the typed record from the raw manifest table.
    ///
    /// The single place manifest shape is decided: required fields produce
    /// `MissingField`, wrong shapes produce `TypeMismatch`, leftover keys
    /// land in `ignored`.
    fn from_table(mut table: toml::Table, ignored: &mut Vec<String>) -> Result<Self, ConfigError> {
        let path_prefix = match table.remove("path_prefix") {
            None => return Err(ConfigError::MissingField(FieldPath::new("path_prefix"))),
            Some(Value::String(prefix)) if prefix.is_empty() => {
                return Err(ConfigError::MissingField(FieldPath::new("path_prefix")));
            }
            Some(Value::String(prefix)) => prefix,
            Some(other) => {
                return Err(ConfigError::TypeMismatch {
                    field: FieldPath::new("path_prefix"),
                    expected: "string",
                    found: other.type_str(),
                });
            }
        };

        let plugins = match table.remove("plugins") {
            None => Vec::new(),
            Some(Value::Array(items)) => {
                PluginSpec::parse_chain(&items, &FieldPath::new("plugins"), ignored)?
            }
            Some(other) => {
                return Err(ConfigError::TypeMismatch {
                    field: FieldPath::new("plugins"),
                    expected: "array",
                    found: other.type_str(),
                });
            }
        };

        let metadata = match table.remove("metadata") {
            None => MetadataConfig::default(),
            Some(Value::Table(metadata)) => {
                MetadataConfig::from_table(metadata, &FieldPath::new("metadata"))?
            }
            Some(other) => {
                return Err(ConfigError::TypeMismatch {
                    field: FieldPath::new("metadata"),
                    expected: "table",
                    found: other.type_str(),
                });
            }
        };

        ignored.extend(table.keys().cloned());

        Ok(Self {
            config_path: PathBuf::new(),
            path_prefix,
            plugins,
            metadata,
        })
    }

    /// Serialize back to manifest TOML.
    ///
    /// Reloading the output yields an identical record.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only the filename; the manifest is found by upward search
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        // Default no (empty input), explicit "y" or "yes" to continue
        Ok(input == "y" || input == "yes")
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the loaded record.
    ///
    /// Collects all findings and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if !self.path_prefix.starts_with('/') {
            diag.error_with_hint(
                FieldPath::new("path_prefix"),
                format!("must start with '/', got \"{}\"", self.path_prefix),
                "use \"/\" when the site is served from the domain root",
            );
        } else if self.path_prefix.len() > 1 && self.path_prefix.ends_with('/') {
            diag.warn(FieldPath::new("path_prefix"), "trailing '/' is redundant");
        }

        if self.path_prefix.chars().any(char::is_whitespace) {
            diag.error(FieldPath::new("path_prefix"), "must not contain whitespace");
        }

        if self.plugins.is_empty() {
            diag.warn(
                FieldPath::new("plugins"),
                "no plugins declared; pages pass through the pipeline untouched",
            );
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a manifest with the required `path_prefix` preamble.
/// Panics if there are unknown fields (to catch manifest typos in tests).
#[cfg(test)]
pub fn test_parse_manifest(extra: &str) -> SiteConfig {
    let content = format!("path_prefix = \"/\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&content).unwrap();
    assert!(
        ignored.is_empty(),
        "test manifest has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
