//! # Dependency Lifecycle Operations
//!
//! This module drives the per-dependency sequences of backend calls:
//!
//! - **acquire**: clone without checkout, then check out the pin.
//! - **refresh**: fetch from all remotes, then check out the pin again.
//! - **pin**: tag `HEAD` and push the tag to `origin`.
//! - **unpin**: delete the tag locally and on `origin`.
//!
//! Checking out a pin means a quiet checkout of the tag, or, for a branch, a
//! checkout followed by `pull --ff-only --no-rebase origin <branch>`. A branch
//! that has diverged from its upstream therefore fails instead of being
//! merged.
//!
//! Each sequence stops at its first failing step and the error becomes the
//! dependency's [`Outcome`]. Outcomes are values, never panics or early
//! returns out of a batch, so one broken repository does not prevent the
//! remaining ones from being processed.

use std::fmt;
use std::path::Path;

use log::info;

use crate::defaults::DEFAULT_REMOTE;
use crate::error::{Error, Result};
use crate::git::PullOptions;
use crate::manifest::{DependencySpec, Manifest, Pin};
use crate::repository::RepositoryBackend;

/// Why an operation left a dependency alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `acquire` found a checkout already in place.
    AlreadyPresent,
    /// The operation needs a checkout and there is none.
    NotFound,
}

/// Result of one lifecycle operation on one dependency.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    Skipped(SkipReason),
    Failed(Error),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl From<Result<Outcome>> for Outcome {
    fn from(result: Result<Outcome>) -> Self {
        result.unwrap_or_else(Outcome::Failed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed => f.write_str("done"),
            Outcome::Skipped(SkipReason::AlreadyPresent) => f.write_str("found -> ignored"),
            Outcome::Skipped(SkipReason::NotFound) => f.write_str("not found -> ignored"),
            Outcome::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}

/// Ordered outcomes of one command over a set of dependencies.
#[derive(Debug, Default)]
pub struct BatchReport {
    entries: Vec<(String, Outcome)>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, outcome: Outcome) {
        self.entries.push((name.into(), outcome));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries
            .iter()
            .map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dependencies whose operation failed.
    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_failure())
            .count()
    }
}

/// Lifecycle operations over the dependencies of one manifest.
pub struct Lifecycle<'a> {
    manifest: &'a Manifest,
    backend: &'a dyn RepositoryBackend,
}

impl<'a> Lifecycle<'a> {
    pub fn new(manifest: &'a Manifest, backend: &'a dyn RepositoryBackend) -> Self {
        Self { manifest, backend }
    }

    /// Clones a declared dependency and checks out its pin.
    ///
    /// An existing checkout is left untouched.
    pub fn acquire(&self, name: &str) -> Outcome {
        self.try_acquire(name).into()
    }

    /// Fetches all remotes of an existing checkout and re-applies its pin.
    pub fn refresh(&self, name: &str) -> Outcome {
        self.try_refresh(name).into()
    }

    /// Tags the checkout's `HEAD` with `tag` and pushes the tag to `origin`.
    pub fn pin(&self, name: &str, tag: &str) -> Outcome {
        self.with_checkout(name, |dir| {
            info!("adding tag {}", tag);
            self.backend.tag(dir, tag)?;
            info!("pushing tag {} to {}", tag, DEFAULT_REMOTE);
            self.backend.push_tag(dir, tag, DEFAULT_REMOTE, true)
        })
        .into()
    }

    /// Deletes `tag` from the checkout and from `origin`.
    pub fn unpin(&self, name: &str, tag: &str) -> Outcome {
        self.with_checkout(name, |dir| {
            info!("deleting tag {}", tag);
            self.backend.delete_tag(dir, tag)?;
            info!("deleting tag {} from {}", tag, DEFAULT_REMOTE);
            self.backend.push_delete_tag(dir, tag, DEFAULT_REMOTE, true)
        })
        .into()
    }

    /// Runs `git <command> <args...>` inside the dependency's checkout.
    pub fn passthrough(&self, name: &str, command: &str, args: &[String]) -> Outcome {
        self.with_checkout(name, |dir| self.backend.raw(dir, command, args)).into()
    }

    fn spec(&self, name: &str) -> Result<&'a DependencySpec> {
        self.manifest
            .dependency(name)
            .ok_or_else(|| Error::UnknownDependency {
                name: name.to_string(),
            })
    }

    fn try_acquire(&self, name: &str) -> Result<Outcome> {
        let spec = self.spec(name)?;
        if self.manifest.repo_exists(name) {
            return Ok(Outcome::Skipped(SkipReason::AlreadyPresent));
        }

        let dest = self.manifest.repo_path(name);
        info!("cloning {} into {}", spec.url, dest.display());
        self.backend
            .clone_repo(self.manifest.base_dir(), &spec.url, &dest, true)?;

        self.checkout_pin(&self.manifest.repo_dir(name), spec)?;
        Ok(Outcome::Completed)
    }

    fn try_refresh(&self, name: &str) -> Result<Outcome> {
        let spec = self.spec(name)?;
        if !self.manifest.repo_exists(name) {
            return Ok(Outcome::Skipped(SkipReason::NotFound));
        }

        let dir = self.manifest.repo_dir(name);
        info!("fetching from remotes");
        self.backend.fetch_all(&dir, true)?;

        self.checkout_pin(&dir, spec)?;
        Ok(Outcome::Completed)
    }

    /// Runs `step` in the dependency's checkout, or skips when there is none.
    fn with_checkout<F>(&self, name: &str, step: F) -> Result<Outcome>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        self.spec(name)?;
        if !self.manifest.repo_exists(name) {
            return Ok(Outcome::Skipped(SkipReason::NotFound));
        }
        step(&self.manifest.repo_dir(name))?;
        Ok(Outcome::Completed)
    }

    fn checkout_pin(&self, dir: &Path, spec: &DependencySpec) -> Result<()> {
        let pin = spec.pin();
        info!("checking out {}", pin);
        match pin {
            Pin::Tag(tag) => self.backend.checkout(dir, tag, true),
            Pin::Branch(branch) => {
                self.backend.checkout(dir, branch, true)?;
                info!("pull {} {}", DEFAULT_REMOTE, branch);
                self.backend.pull(
                    dir,
                    DEFAULT_REMOTE,
                    branch,
                    PullOptions {
                        fast_forward_only: true,
                        no_rebase: true,
                        quiet: true,
                    },
                )
            }
        }
    }
}
