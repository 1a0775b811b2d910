//! Manifest scaffolding for new sites.

use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::log;

/// Default manifest filename
const MANIFEST_FILE: &str = "gantry.toml";

/// Starter manifest body (version header is prepended separately).
const MANIFEST_BODY: &str = r##"# URL prefix the site is deployed under. "/" serves from the domain
# root; use "/my-project" for sub-directory deployments.
path_prefix = "/"

# Ordered plugin chain. Entries register in the order listed here.
# A bare name registers a plugin with no options; a table entry passes
# its options payload through to the plugin untouched.
plugins = [
    "catch-links",
    { resolve = "manifest", options = { name = "My Site", background_color = "white", theme_color = "#002635", display = "minimal-ui" } },
    { resolve = "source-filesystem", options = { path = "content/blog", name = "posts" } },
    { resolve = "transform-markdown", options = { plugins = ["copy-linked-files", "smartypants", "autolink-headers"] } },
    "offline",
]

[metadata]
title = "My Site"
author = "Anonymous"
"##;

/// Generate gantry.toml content with comments
pub fn manifest_template() -> String {
    format!(
        "# Gantry manifest (v{})\n# https://github.com/gantry-rs/gantry\n\n{}",
        env!("CARGO_PKG_VERSION"),
        MANIFEST_BODY
    )
}

/// Create a new site manifest.
///
/// With `name`, the site directory is created first; without, the
/// manifest is scaffolded in the current directory.
pub fn new_manifest(name: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let root = match name {
        Some(name) => cwd.join(name),
        None => cwd,
    };

    fs::create_dir_all(&root).with_context(|| format!("Failed to create '{}'", root.display()))?;

    let path = write_manifest(&root)?;
    log!("init"; "created {}", path.display());
    Ok(())
}

/// Write the starter manifest. Refuses to overwrite an existing one.
pub fn write_manifest(root: &Path) -> Result<PathBuf> {
    let path = root.join(MANIFEST_FILE);
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }

    fs::write(&path, manifest_template())
        .with_context(|| format!("Failed to write manifest '{}'", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_loads_cleanly() {
        let (config, ignored) = SiteConfig::parse_with_ignored(&manifest_template()).unwrap();
        assert!(
            ignored.is_empty(),
            "template has unknown fields: {:?}",
            ignored
        );
        assert_eq!(config.path_prefix, "/");
        assert_eq!(config.plugins.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_write_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path()).unwrap();
        assert!(path.exists());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("path_prefix"));
        assert!(content.contains("[metadata]"));
    }

    #[test]
    fn test_manifest_not_overwritten() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path()).unwrap();
        assert!(write_manifest(temp.path()).is_err());
    }
}
