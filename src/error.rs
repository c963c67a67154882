//! # Error Handling
//!
//! This module defines the centralized error type for the `neige` library.
//! It uses `thiserror` to derive descriptive messages for every failure mode
//! the core can run into.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all anticipated failures: malformed manifests,
//!   `init` over an existing manifest, failed `git` invocations, references
//!   to undeclared dependencies and incomplete host metadata.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Only manifest loading errors are meant to abort a command. Failures of
//! individual `git` steps are carried as values in per-dependency outcomes
//! (see [`crate::lifecycle::Outcome`]) so a batch keeps going.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for neige operations
#[derive(Error, Debug)]
pub enum Error {
    /// A manifest or host descriptor exists but could not be parsed.
    ///
    /// A missing file is never reported with this variant; absence falls
    /// back to the empty default.
    #[error("Manifest parsing error in {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// `init` found a manifest already present at the target location.
    #[error("ignored: existing {} file found", path.display())]
    PathConflict { path: PathBuf },

    /// A `git` invocation exited unsuccessfully or could not be spawned.
    #[error("git command failed in {}: {command} - {stderr}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    /// A dependency name was requested that the manifest does not declare.
    #[error("Unknown dependency: {name} is not declared in the manifest")]
    UnknownDependency { name: String },

    /// The host descriptor lacks a field needed to compose the collective tag.
    #[error("Host descriptor has no {field}; cannot compose the collective tag")]
    MissingHostMetadata { field: &'static str },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during serialization.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
