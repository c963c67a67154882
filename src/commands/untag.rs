//! # Untag Command Implementation
//!
//! Reverses `tag`: deletes the `<name>-<version>` tag from every checked-out
//! dependency and pushes the deletion to `origin`.

use anyhow::Result;

use neige::lifecycle::Lifecycle;
use neige::manifest::Project;
use neige::repository::RepositoryBackend;

use super::drive;

/// Execute the `untag` command.
pub fn execute(project: &Project, backend: &dyn RepositoryBackend) -> Result<()> {
    let tag = project.host.collective_tag()?;
    let lifecycle = Lifecycle::new(&project.manifest, backend);
    drive(
        "UNTAG",
        Some(&tag),
        &project.manifest.dependency_names(),
        |name| lifecycle.unpin(name, &tag),
    )
}
