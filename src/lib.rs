//! # Neige Library
//!
//! This library keeps the source dependencies of a host project checked out
//! next to it, pinned to the refs a manifest declares, and reports how the
//! workspace has drifted from that manifest. It backs the `neige`
//! command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use neige::manifest::{DependencySpec, Manifest, Pin};
//!
//! let mut manifest = Manifest::default();
//! manifest.deps.insert(
//!     "parser",
//!     DependencySpec {
//!         url: "https://example.com/parser.git".to_string(),
//!         tag: Some("v2.1.0".to_string()),
//!         branch: None,
//!     },
//! );
//!
//! assert_eq!(manifest.repo_path("parser").to_str(), Some("./deps/parser"));
//! assert_eq!(manifest.dependency("parser").unwrap().pin(), Pin::Tag("v2.1.0"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the `neige.json` document mapping dependency
//!   names to remote URLs and pins, plus the host project's `package.json`
//!   identity.
//! - **Backend (`repository`, `git`)**: the `RepositoryBackend` trait and its
//!   implementation on the system `git` binary.
//! - **Lifecycle (`lifecycle`)**: acquire, refresh, pin and unpin, each a
//!   fixed sequence of backend calls for one dependency.
//! - **Workspace (`workspace`)**: which checkouts exist and which directories
//!   under the workspace root are orphans.
//! - **Analysis (`analysis`)**: dependencies required by a checkout's own
//!   manifest but absent from the host manifest.
//! - **Status (`status`)**: the aggregated report behind `neige status`.
//!
//! All operations are synchronous and run one dependency at a time.

pub mod analysis;
pub mod defaults;
pub mod error;
pub mod git;
pub mod lifecycle;
pub mod manifest;
pub mod output;
pub mod repository;
pub mod status;
pub mod workspace;

#[cfg(test)]
mod git_proptest;
