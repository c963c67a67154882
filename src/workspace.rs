//! Read-only view of the workspace root.
//!
//! Answers two questions about the directories under the manifest's `root`:
//! which requested dependencies are checked out, and which directories are
//! there without being requested (orphans).

use std::collections::BTreeSet;

use crate::error::Result;
use crate::manifest::Manifest;

/// Directories under the workspace root whose name is not in `names`.
pub fn orphans(manifest: &Manifest, names: &[String]) -> Result<BTreeSet<String>> {
    Ok(manifest
        .root_entries()?
        .into_iter()
        .filter(|entry| !names.contains(entry))
        .collect())
}

/// Declared dependencies that currently have a checkout, in manifest order.
pub fn present_dependencies(manifest: &Manifest) -> Vec<String> {
    manifest
        .dependency_names()
        .into_iter()
        .filter(|name| manifest.repo_exists(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn workspace(manifest_json: &str, dirs: &[&str]) -> (TempDir, Manifest) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("neige.json"), manifest_json).unwrap();
        for dir in dirs {
            fs::create_dir_all(temp_dir.path().join("deps").join(dir)).unwrap();
        }
        let manifest = Manifest::load(temp_dir.path()).unwrap();
        (temp_dir, manifest)
    }

    #[test]
    fn test_orphans_are_root_entries_minus_declared() {
        let (_temp, manifest) = workspace(
            r#"{ "deps": { "a": { "url": "u" }, "b": { "url": "v" } } }"#,
            &["a", "b", "c"],
        );

        let orphans = orphans(&manifest, &manifest.dependency_names()).unwrap();

        assert_eq!(orphans, BTreeSet::from(["c".to_string()]));
    }

    #[test]
    fn test_orphans_ignore_plain_files() {
        let (temp, manifest) = workspace(r#"{ "deps": {} }"#, &["a"]);
        fs::write(temp.path().join("deps/README"), "x").unwrap();

        let orphans = orphans(&manifest, &[]).unwrap();

        assert_eq!(orphans, BTreeSet::from(["a".to_string()]));
    }

    #[test]
    fn test_orphans_without_root_directory() {
        let (_temp, manifest) = workspace(r#"{ "deps": { "a": { "url": "u" } } }"#, &[]);
        assert!(orphans(&manifest, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_present_dependencies_keeps_manifest_order() {
        let (_temp, manifest) = workspace(
            r#"{ "deps": { "z": { "url": "u" }, "y": { "url": "v" }, "x": { "url": "w" } } }"#,
            &["x", "z"],
        );

        assert_eq!(present_dependencies(&manifest), vec!["z", "x"]);
    }
}
