//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::EMPTY);
//!     fixture.command().arg("status").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::{checkout, git, manifest_for, UpstreamRepo};
    pub use super::TestFixture;
}

/// Common `neige.json` documents.
#[allow(dead_code)]
pub mod manifests {
    /// Manifest with no dependencies.
    pub const EMPTY: &str = r#"{ "root": "./deps", "deps": {} }"#;

    /// Two dependencies, one per pin kind, pointing at unreachable remotes.
    pub const TWO_DEPS: &str = r#"{
  "root": "./deps",
  "deps": {
    "alpha": { "url": "https://invalid.example/alpha.git", "tag": "v1.0.0" },
    "beta": { "url": "https://invalid.example/beta.git", "branch": "main" }
  }
}"#;

    /// Not JSON at all.
    pub const MALFORMED: &str = "{ deps: ";
}

/// A temporary project directory holding `neige.json` and `package.json`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `neige.json` with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("neige.json", content)
    }

    /// Write a `package.json` carrying the host name and version.
    #[allow(dead_code)]
    pub fn with_host(self, name: &str, version: &str) -> Self {
        let content = format!(r#"{{ "name": "{}", "version": "{}" }}"#, name, version);
        self.with_file("package.json", &content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Create an empty directory.
    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// Colour is disabled so assertions can match plain text.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("neige");
        cmd.current_dir(self.path())
            .arg("--color")
            .arg("never")
            .env_remove("NEIGE_PROJECT_DIR")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `git` in `dir` with a fixed identity and returns its trimmed stdout.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Neige Tests",
            "-c",
            "user.email=tests@neige.invalid",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A local repository standing in for a dependency's remote.
///
/// It starts with one commit on `main` tagged `v1`.
#[allow(dead_code)]
pub struct UpstreamRepo {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl UpstreamRepo {
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let upstream = Self { temp_dir };
        upstream.git(&["init", "--quiet"]);
        upstream.git(&["checkout", "--quiet", "-b", "main"]);
        upstream.commit("README.md", "first\n");
        upstream.git(&["tag", "v1"]);
        upstream
    }

    /// Writes `file` and commits it on the current branch.
    pub fn commit(&self, file: &str, content: &str) {
        self.temp_dir
            .child(file)
            .write_str(content)
            .expect("Failed to write file");
        self.git(&["add", file]);
        self.git(&["commit", "--quiet", "-m", file]);
    }

    pub fn git(&self, args: &[&str]) -> String {
        git(self.path(), args)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The location used as the dependency `url`.
    pub fn url(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }
}

/// Builds a manifest whose dependencies all point at `url`.
#[allow(dead_code)]
pub fn manifest_for(url: &str, deps: &[(&str, &str, &str)]) -> String {
    let entries: Vec<String> = deps
        .iter()
        .map(|(name, kind, reference)| {
            format!(
                r#""{}": {{ "url": {:?}, "{}": "{}" }}"#,
                name, url, kind, reference
            )
        })
        .collect();
    format!(r#"{{ "root": "./deps", "deps": {{ {} }} }}"#, entries.join(", "))
}

/// Path of a dependency checkout inside a fixture.
#[allow(dead_code)]
pub fn checkout(fixture: &TestFixture, name: &str) -> PathBuf {
    fixture.path().join("deps").join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_manifest() {
        let fixture = TestFixture::new().with_manifest(manifests::EMPTY);
        assert!(fixture.path().join("neige.json").exists());
    }

    #[test]
    fn test_manifest_for_is_valid_json() {
        let manifest = manifest_for("/tmp/up stream", &[("x", "branch", "main"), ("t", "tag", "v1")]);
        let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(value["deps"]["x"]["url"], "/tmp/up stream");
        assert_eq!(value["deps"]["t"]["tag"], "v1");
    }
}
