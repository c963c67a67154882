//! # Status Command Implementation
//!
//! Prints the state of the requested dependencies (all of them by default)
//! and of the host project, followed by orphan directories, dependencies
//! missing from the manifest and a one-line summary. This command never
//! modifies anything.

use anyhow::{bail, Result};
use clap::Args;

use neige::manifest::Project;
use neige::output::OutputConfig;
use neige::repository::RepositoryBackend;
use neige::status;

/// Report on dependency checkouts
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Dependencies to report on. Defaults to every declared dependency.
    ///
    /// With exactly one name, each changed file is listed.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

/// Execute the `status` command.
pub fn execute(
    project: &Project,
    backend: &dyn RepositoryBackend,
    output: &OutputConfig,
    args: StatusArgs,
) -> Result<()> {
    let report = status::report(project, backend, &args.names)?;
    println!("{}", report.render(output));

    if report.has_failures() {
        bail!(
            "status could not be determined for {} repositories",
            report.analysis.failed_count
        );
    }
    Ok(())
}
