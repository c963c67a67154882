//! # Manifest Model and Persistence
//!
//! This module defines the data structures behind `neige.json`, the document
//! that declares which repositories a host project depends on, and the
//! host descriptor (`package.json`) that supplies the project's own name and
//! version.
//!
//! ## Key Components
//!
//! - **`Manifest`**: workspace root, path convention and the ordered
//!   dependency set. Knows where each dependency lives on disk.
//! - **`DependencySpec`** / **`Pin`**: the remote location of one dependency
//!   and whether it follows an immutable tag or a tracked branch.
//! - **`HostMetadata`**: the host project's `name` and `version`, used to
//!   compose the collective tag.
//! - **`Project`**: a manifest loaded together with its host metadata.
//!
//! ## Loading
//!
//! Both documents are optional. A missing file yields the empty default, so
//! commands can run in a directory that has never been initialised. Content
//! that is present but not valid JSON, or that does not match the schema,
//! fails with [`Error::ManifestParse`].

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::defaults::{DEFAULT_BRANCH, DEFAULT_ROOT, HOST_DESCRIPTOR_FILE, MANIFEST_FILE};
use crate::error::{Error, Result};

/// Separator rule used when joining the workspace root and a dependency name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathConvention {
    #[default]
    Posix,
    Win32,
}

impl PathConvention {
    pub fn separator(self) -> char {
        match self {
            PathConvention::Posix => '/',
            PathConvention::Win32 => '\\',
        }
    }
}

/// Declaration of a single dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Remote repository location, passed to `git clone` untouched.
    pub url: String,
    /// Immutable ref to check out. Wins over `branch` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Branch to track and fast-forward. Defaults to `master`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl DependencySpec {
    /// Returns the effective pin of this dependency.
    pub fn pin(&self) -> Pin<'_> {
        match (&self.tag, &self.branch) {
            (Some(tag), _) => Pin::Tag(tag),
            (None, Some(branch)) => Pin::Branch(branch),
            (None, None) => Pin::Branch(DEFAULT_BRANCH),
        }
    }
}

/// The ref a dependency is checked out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pin<'a> {
    /// Checked out once and never moved by a refresh.
    Tag(&'a str),
    /// Checked out and fast-forwarded from `origin` on every refresh.
    Branch(&'a str),
}

impl fmt::Display for Pin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pin::Tag(tag) => write!(f, "tag {}", tag),
            Pin::Branch(branch) => write!(f, "branch {}", branch),
        }
    }
}

/// Dependency declarations in document order.
///
/// Serialized as a JSON object. Repeated keys are rejected rather than
/// silently collapsed, since names must be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies(Vec<(String, DependencySpec)>);

impl Dependencies {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DependencySpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn get(&self, name: &str) -> Option<&DependencySpec> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, spec)| spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds or replaces a declaration, keeping the position of an existing one.
    pub fn insert(&mut self, name: impl Into<String>, spec: DependencySpec) {
        let name = name.into();
        match self.0.iter_mut().find(|(candidate, _)| *candidate == name) {
            Some(entry) => entry.1 = spec,
            None => self.0.push((name, spec)),
        }
    }
}

impl Serialize for Dependencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, spec) in &self.0 {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Dependencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DependenciesVisitor;

        impl<'de> Visitor<'de> for DependenciesVisitor {
            type Value = Dependencies;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of dependency names to dependency declarations")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, DependencySpec)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, spec)) = access.next_entry::<String, DependencySpec>()? {
                    if entries.iter().any(|(existing, _)| *existing == name) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate dependency `{}`",
                            name
                        )));
                    }
                    entries.push((name, spec));
                }
                Ok(Dependencies(entries))
            }
        }

        deserializer.deserialize_map(DependenciesVisitor)
    }
}

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

/// The `neige.json` document of one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Workspace directory, relative to the project directory.
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default)]
    pub path_convention: PathConvention,
    #[serde(default)]
    pub deps: Dependencies,
    /// Directory the manifest was loaded from; relative paths resolve here.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            root: default_root(),
            path_convention: PathConvention::default(),
            deps: Dependencies::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Manifest {
    /// Loads `neige.json` from `dir`, falling back to an empty manifest when
    /// the file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut manifest: Manifest = read_json_or_default(&dir.join(MANIFEST_FILE))?;
        manifest.base_dir = dir.to_path_buf();
        Ok(manifest)
    }

    /// Creates the default manifest in `dir`.
    ///
    /// Never overwrites: an existing `neige.json` yields
    /// [`Error::PathConflict`] and leaves the file untouched.
    pub fn init(dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        if path.exists() {
            return Err(Error::PathConflict { path });
        }
        Manifest::default().save(&path)?;
        Ok(path)
    }

    /// Writes the manifest as pretty-printed JSON, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self).map_err(|e| Error::Serialization {
            message: e.to_string(),
        })?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Dependency names in document order.
    pub fn dependency_names(&self) -> Vec<String> {
        self.deps.iter().map(|(name, _)| name.to_string()).collect()
    }

    pub fn dependency(&self, name: &str) -> Option<&DependencySpec> {
        self.deps.get(name)
    }

    /// Joins the workspace root and `name` with the configured separator.
    ///
    /// The result is relative to the project directory whenever `root` is.
    pub fn repo_path(&self, name: &str) -> PathBuf {
        let separator = self.path_convention.separator();
        if self.root.is_empty() {
            PathBuf::from(name)
        } else if self.root.ends_with(separator) {
            PathBuf::from(format!("{}{}", self.root, name))
        } else {
            PathBuf::from(format!("{}{}{}", self.root, separator, name))
        }
    }

    /// Location of the dependency's checkout as seen from the current process.
    pub fn repo_dir(&self, name: &str) -> PathBuf {
        self.base_dir.join(self.repo_path(name))
    }

    pub fn repo_exists(&self, name: &str) -> bool {
        self.repo_dir(name).exists()
    }

    /// Location of the workspace root as seen from the current process.
    pub fn root_dir(&self) -> PathBuf {
        self.base_dir.join(&self.root)
    }

    /// Names of the directories directly under the workspace root, sorted.
    ///
    /// Plain files are ignored and a missing root yields no entries.
    pub fn root_entries(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(self.root_dir()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Identity of the host project, read from its `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HostMetadata {
    pub fn load(dir: &Path) -> Result<Self> {
        read_json_or_default(&dir.join(HOST_DESCRIPTOR_FILE))
    }

    /// The tag applied to every dependency by `tag`/`untag`:
    /// `<name>-<version>`.
    pub fn collective_tag(&self) -> Result<String> {
        let name = self
            .name
            .as_deref()
            .ok_or(Error::MissingHostMetadata { field: "name" })?;
        let version = self
            .version
            .as_deref()
            .ok_or(Error::MissingHostMetadata { field: "version" })?;
        Ok(format!("{}-{}", name, version))
    }
}

/// A manifest together with the metadata of the project that owns it.
#[derive(Debug, Clone)]
pub struct Project {
    pub manifest: Manifest,
    pub host: HostMetadata,
}

impl Project {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            manifest: Manifest::load(dir)?,
            host: HostMetadata::load(dir)?,
        })
    }

    pub fn dir(&self) -> &Path {
        self.manifest.base_dir()
    }
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&content).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
