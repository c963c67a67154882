//! # Tag Command Implementation
//!
//! Snapshots the dependencies used by a release of the host project: every
//! checked-out dependency gets the tag `<name>-<version>` (taken from the
//! host's `package.json`) at its current `HEAD`, and the tag is pushed to
//! `origin`. A tag that already exists is reported as a failure.

use anyhow::Result;

use neige::lifecycle::Lifecycle;
use neige::manifest::Project;
use neige::repository::RepositoryBackend;

use super::drive;

/// Execute the `tag` command.
pub fn execute(project: &Project, backend: &dyn RepositoryBackend) -> Result<()> {
    let tag = project.host.collective_tag()?;
    let lifecycle = Lifecycle::new(&project.manifest, backend);
    drive(
        "TAG",
        Some(&tag),
        &project.manifest.dependency_names(),
        |name| lifecycle.pin(name, &tag),
    )
}
