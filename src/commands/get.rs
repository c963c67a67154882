//! # Get Command Implementation
//!
//! Clones every requested dependency (all declared ones by default) that has
//! no checkout yet and checks out its pin. Existing checkouts are reported
//! and left alone; use `update` to move them.

use anyhow::Result;
use clap::Args;

use neige::lifecycle::Lifecycle;
use neige::manifest::Project;
use neige::repository::RepositoryBackend;

use super::drive;

/// Clone missing dependencies
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dependencies to clone. Defaults to every declared dependency.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

/// Execute the `get` command.
pub fn execute(project: &Project, backend: &dyn RepositoryBackend, args: GetArgs) -> Result<()> {
    let names = if args.names.is_empty() {
        project.manifest.dependency_names()
    } else {
        args.names
    };

    let lifecycle = Lifecycle::new(&project.manifest, backend);
    drive("GET", None, &names, |name| lifecycle.acquire(name))
}
