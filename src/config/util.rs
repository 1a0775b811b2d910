//! Manifest location helpers.

use std::path::{Path, PathBuf};

/// Find the manifest by searching upward from the current directory.
///
/// Commands should work from anywhere inside a site, so the search walks
/// cwd and its ancestors until `manifest_name` appears:
///
/// ```text
/// /home/user/site/content/blog/   ← cwd
/// /home/user/site/gantry.toml     ← found
/// ```
pub fn find_manifest(manifest_name: &Path) -> Option<PathBuf> {
    if manifest_name.is_absolute() {
        return manifest_name.exists().then(|| manifest_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_in_ancestors(&cwd, manifest_name)
}

/// Search `start` and each of its ancestors for `manifest_name`.
fn find_in_ancestors(start: &Path, manifest_name: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(manifest_name))
        .find(|candidate| candidate.exists())
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_ancestors() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("gantry.toml");
        std::fs::write(&manifest, "path_prefix = \"/\"").unwrap();

        let nested = temp.path().join("content/blog");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_in_ancestors(&nested, Path::new("gantry.toml")).unwrap();
        assert_eq!(found, manifest);
    }

    #[test]
    fn test_find_in_ancestors_missing() {
        let temp = TempDir::new().unwrap();
        assert!(find_in_ancestors(temp.path(), Path::new("no-such-manifest.toml")).is_none());
    }
}
