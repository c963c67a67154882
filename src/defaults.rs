//! Default values for neige configuration.
//!
//! This module provides centralized default values used across the manifest
//! model and the commands, so the same literals are not repeated.

/// File name of the dependency manifest inside a project directory.
pub const MANIFEST_FILE: &str = "neige.json";

/// File name of the host project descriptor read for `name` and `version`.
pub const HOST_DESCRIPTOR_FILE: &str = "package.json";

/// Workspace directory dependencies are checked out under.
pub const DEFAULT_ROOT: &str = "./deps";

/// Branch tracked by a dependency that declares neither a tag nor a branch.
pub const DEFAULT_BRANCH: &str = "master";

/// Remote that pulls and tag pushes are addressed to.
pub const DEFAULT_REMOTE: &str = "origin";

/// Label used for the host project in status output when it has no name.
pub const UNNAMED_HOST: &str = ".";
