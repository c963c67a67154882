//! CLI argument parsing and command dispatch

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use neige::manifest::Project;
use neige::output::OutputConfig;
use neige::repository::GitBackend;

use crate::commands;

/// Neige - Keep a project's source dependencies checked out and in sync
#[derive(Parser, Debug)]
#[command(name = "neige")]
#[command(version, about, long_about = None)]
#[command(after_help = "Run any git command inside a dependency with `neige git-<cmd> <name> [args...]`.")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Project directory containing neige.json and package.json
    #[arg(
        short = 'C',
        long,
        global = true,
        value_name = "DIR",
        env = "NEIGE_PROJECT_DIR",
        default_value = "."
    )]
    project_dir: PathBuf,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty neige.json unless one already exists
    Init,

    /// Report modified, missing and orphaned dependency checkouts
    Status(commands::status::StatusArgs),

    /// Clone missing dependencies and check out their pins
    Get(commands::get::GetArgs),

    /// Fetch every checked-out dependency and re-apply its pin
    Update,

    /// Tag every dependency with <name>-<version> of the host project and push the tag
    Tag,

    /// Delete the <name>-<version> tag from every dependency and its origin
    Untag,

    /// git-<cmd> <name> [args...]: run a git command inside a dependency
    #[command(external_subcommand)]
    Git(Vec<String>),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);
        let backend = GitBackend;
        let dir = self.project_dir.as_path();

        match self.command {
            Commands::Init => commands::init::execute(dir),
            Commands::Status(args) => {
                commands::status::execute(&load_project(dir)?, &backend, &output, args)
            }
            Commands::Get(args) => commands::get::execute(&load_project(dir)?, &backend, args),
            Commands::Update => commands::update::execute(&load_project(dir)?, &backend),
            Commands::Tag => commands::tag::execute(&load_project(dir)?, &backend),
            Commands::Untag => commands::untag::execute(&load_project(dir)?, &backend),
            Commands::Git(argv) => commands::git::execute(&load_project(dir)?, &backend, argv),
        }
    }
}

fn load_project(dir: &Path) -> Result<Project> {
    Project::load(dir).with_context(|| format!("Failed to load project in {}", dir.display()))
}

/// Routes `log` records to stderr, leaving stdout to the status lines.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
