//! # Git Pass-Through
//!
//! `neige git-<cmd> <name> [args...]` runs `git <cmd> [args...]` inside the
//! checkout of dependency `<name>`, with the terminal attached.

use anyhow::{anyhow, Result};

use neige::lifecycle::{Lifecycle, Outcome};
use neige::manifest::Project;
use neige::repository::RepositoryBackend;

const USAGE: &str = "usage: neige git-<cmd> <name> [args...]";

/// Splits `git-<cmd> <name> [args...]` into its parts.
fn parse(argv: &[String]) -> Result<(&str, &str, &[String])> {
    let (subcommand, rest) = argv.split_first().ok_or_else(|| anyhow!(USAGE))?;
    let command = subcommand
        .strip_prefix("git-")
        .filter(|command| !command.is_empty())
        .ok_or_else(|| anyhow!("unrecognized subcommand '{}'\n\n{}", subcommand, USAGE))?;
    let (name, args) = rest.split_first().ok_or_else(|| anyhow!(USAGE))?;
    Ok((command, name, args))
}

/// Execute a `git-<cmd>` pass-through.
pub fn execute(project: &Project, backend: &dyn RepositoryBackend, argv: Vec<String>) -> Result<()> {
    let (command, name, args) = parse(&argv)?;
    let lifecycle = Lifecycle::new(&project.manifest, backend);

    match lifecycle.passthrough(name, command, args) {
        Outcome::Failed(e) => Err(e.into()),
        outcome @ Outcome::Skipped(_) => {
            println!("GIT {} {}", name, outcome);
            Ok(())
        }
        Outcome::Completed => Ok(()),
    }
}
