//! # Update Command Implementation
//!
//! Brings every checked-out dependency up to date: fetches from all of its
//! remotes and re-applies its pin. Branch pins are fast-forwarded from
//! `origin`; tag pins stay exactly on their tag. Dependencies without a
//! checkout are reported and skipped.

use anyhow::Result;

use neige::lifecycle::Lifecycle;
use neige::manifest::Project;
use neige::repository::RepositoryBackend;

use super::drive;

/// Execute the `update` command.
pub fn execute(project: &Project, backend: &dyn RepositoryBackend) -> Result<()> {
    let lifecycle = Lifecycle::new(&project.manifest, backend);
    drive(
        "UPDATE",
        None,
        &project.manifest.dependency_names(),
        |name| lifecycle.refresh(name),
    )
}
