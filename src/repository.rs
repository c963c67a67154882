//! # Repository Backend
//!
//! This module defines `RepositoryBackend`, the only way the rest of the
//! crate talks to version control, and `GitBackend`, its production
//! implementation on top of [`crate::git`].
//!
//! ## Design
//!
//! Lifecycle and status logic are written against the trait so they can be
//! driven by a recording mock in tests, without spawning `git` or touching
//! a remote. Every operation takes the working directory it applies to and
//! returns a `Result`; a failing `git` step is an ordinary value the caller
//! decides how to report.

use std::path::Path;

use crate::error::Result;
use crate::git::{self, GitChange, PullOptions};

/// Version control operations consumed by the lifecycle and status layers.
pub trait RepositoryBackend {
    /// Clones `url` into `dest`, resolved relative to `dir`.
    fn clone_repo(&self, dir: &Path, url: &str, dest: &Path, no_checkout: bool) -> Result<()>;

    fn checkout(&self, dir: &Path, reference: &str, quiet: bool) -> Result<()>;

    /// Fetches from every configured remote.
    fn fetch_all(&self, dir: &Path, quiet: bool) -> Result<()>;

    fn fetch(&self, dir: &Path, remote: &str, quiet: bool) -> Result<()>;

    fn pull(&self, dir: &Path, remote: &str, branch: &str, options: PullOptions) -> Result<()>;

    fn tag(&self, dir: &Path, name: &str) -> Result<()>;

    fn push_tag(&self, dir: &Path, name: &str, remote: &str, quiet: bool) -> Result<()>;

    fn delete_tag(&self, dir: &Path, name: &str) -> Result<()>;

    fn push_delete_tag(&self, dir: &Path, name: &str, remote: &str, quiet: bool) -> Result<()>;

    /// Uncommitted changes in the working tree; empty when clean.
    fn status(&self, dir: &Path) -> Result<Vec<GitChange>>;

    /// Whether `dir` is anywhere inside a working tree, not only at its root.
    fn is_inside_work_tree(&self, dir: &Path) -> Result<bool>;

    /// Runs an arbitrary subcommand with the user's terminal attached.
    fn raw(&self, dir: &Path, command: &str, args: &[String]) -> Result<()>;
}

/// The default implementation of `RepositoryBackend`, which uses the
/// system's `git` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitBackend;

impl RepositoryBackend for GitBackend {
    fn clone_repo(&self, dir: &Path, url: &str, dest: &Path, no_checkout: bool) -> Result<()> {
        git::clone_repo(dir, url, dest, no_checkout)
    }

    fn checkout(&self, dir: &Path, reference: &str, quiet: bool) -> Result<()> {
        git::checkout(dir, reference, quiet)
    }

    fn fetch_all(&self, dir: &Path, quiet: bool) -> Result<()> {
        git::fetch_all(dir, quiet)
    }

    fn fetch(&self, dir: &Path, remote: &str, quiet: bool) -> Result<()> {
        git::fetch(dir, remote, quiet)
    }

    fn pull(&self, dir: &Path, remote: &str, branch: &str, options: PullOptions) -> Result<()> {
        git::pull(dir, remote, branch, options)
    }

    fn tag(&self, dir: &Path, name: &str) -> Result<()> {
        git::tag(dir, name)
    }

    fn push_tag(&self, dir: &Path, name: &str, remote: &str, quiet: bool) -> Result<()> {
        git::push_tag(dir, name, remote, quiet)
    }

    fn delete_tag(&self, dir: &Path, name: &str) -> Result<()> {
        git::delete_tag(dir, name)
    }

    fn push_delete_tag(&self, dir: &Path, name: &str, remote: &str, quiet: bool) -> Result<()> {
        git::push_delete_tag(dir, name, remote, quiet)
    }

    fn status(&self, dir: &Path) -> Result<Vec<GitChange>> {
        git::status(dir)
    }

    fn is_inside_work_tree(&self, dir: &Path) -> Result<bool> {
        git::is_inside_work_tree(dir)
    }

    fn raw(&self, dir: &Path, command: &str, args: &[String]) -> Result<()> {
        git::run_inherited(dir, command, args)
    }
}
