//! # Status Reporting
//!
//! Builds the aggregate picture shown by `neige status`: the state of every
//! requested dependency and of the host project, the orphan directories in
//! the workspace, and the dependencies required by checkouts but missing from
//! the manifest.
//!
//! States are queried fresh on every call; nothing is cached between runs.
//! When exactly one dependency is requested the report carries each
//! individual change, otherwise only the number of changes per repository.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use log::debug;

use crate::analysis::{self, Unsatisfied};
use crate::defaults::UNNAMED_HOST;
use crate::error::{Error, Result};
use crate::git::GitChange;
use crate::manifest::Project;
use crate::output::{OutputConfig, Tone};
use crate::repository::RepositoryBackend;
use crate::workspace;

/// State of one working tree at the time of the query.
#[derive(Debug)]
pub enum RepositoryState {
    Clean,
    Dirty(Vec<GitChange>),
    Absent,
    /// The backend could not report a status.
    Unknown(Error),
}

#[derive(Debug)]
pub struct RepositoryStatus {
    pub name: String,
    pub state: RepositoryState,
}

impl RepositoryStatus {
    /// Queries the working tree at `dir`, or records it as absent.
    pub fn probe(backend: &dyn RepositoryBackend, name: &str, dir: &Path) -> Self {
        let state = if !dir.exists() {
            RepositoryState::Absent
        } else {
            match backend.status(dir) {
                Ok(changes) if changes.is_empty() => RepositoryState::Clean,
                Ok(changes) => RepositoryState::Dirty(changes),
                Err(e) => RepositoryState::Unknown(e),
            }
        };
        Self {
            name: name.to_string(),
            state,
        }
    }
}

/// Counts and findings of one status run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Dirty repositories, the host project included.
    pub modified_count: usize,
    pub missing_count: usize,
    pub failed_count: usize,
    pub orphan_dirs: BTreeSet<String>,
    pub unsatisfied_deps: Unsatisfied,
}

#[derive(Debug)]
pub struct StatusReport {
    pub repositories: Vec<RepositoryStatus>,
    /// `None` when the project directory is outside any git working tree.
    pub host: Option<RepositoryStatus>,
    /// Whether individual changes are listed under each dirty repository.
    pub show_changes: bool,
    pub analysis: AnalysisResult,
}

/// Builds the status report for `requested`, or for every declared
/// dependency when `requested` is empty.
pub fn report(
    project: &Project,
    backend: &dyn RepositoryBackend,
    requested: &[String],
) -> Result<StatusReport> {
    let manifest = &project.manifest;
    let names = if requested.is_empty() {
        manifest.dependency_names()
    } else {
        requested.to_vec()
    };

    let repositories: Vec<RepositoryStatus> = names
        .iter()
        .map(|name| RepositoryStatus::probe(backend, name, &manifest.repo_dir(name)))
        .collect();

    let label = project.host.name.as_deref().unwrap_or(UNNAMED_HOST);
    let host = match backend.is_inside_work_tree(project.dir()) {
        Ok(true) => Some(RepositoryStatus::probe(backend, label, project.dir())),
        Ok(false) => {
            debug!(
                "{} is not inside a git working tree; skipping host status",
                project.dir().display()
            );
            None
        }
        Err(e) => Some(RepositoryStatus {
            name: label.to_string(),
            state: RepositoryState::Unknown(e),
        }),
    };

    let mut analysis = AnalysisResult {
        orphan_dirs: workspace::orphans(manifest, &names)?,
        unsatisfied_deps: analysis::missing_dependencies(manifest),
        ..AnalysisResult::default()
    };
    for status in repositories.iter().chain(host.iter()) {
        match status.state {
            RepositoryState::Dirty(_) => analysis.modified_count += 1,
            RepositoryState::Absent => analysis.missing_count += 1,
            RepositoryState::Unknown(_) => analysis.failed_count += 1,
            RepositoryState::Clean => {}
        }
    }

    Ok(StatusReport {
        show_changes: names.len() == 1,
        repositories,
        host,
        analysis,
    })
}

impl StatusReport {
    pub fn has_failures(&self) -> bool {
        self.analysis.failed_count > 0
    }

    /// Renders the report as lines of text, colored per `output`.
    pub fn render(&self, output: &OutputConfig) -> String {
        let mut lines = Vec::new();

        for status in self.repositories.iter().chain(self.host.iter()) {
            let name = &status.name;
            match &status.state {
                RepositoryState::Clean => {
                    lines.push(format!("STATUS {} {}", name, output.paint("clean", Tone::Good)));
                }
                RepositoryState::Dirty(changes) => {
                    let found = format!("{} change(s) found", changes.len());
                    lines.push(format!("STATUS {} {}", name, output.paint(&found, Tone::Warning)));
                    if self.show_changes {
                        lines.extend(changes.iter().map(|change| format!("\t{}", change)));
                    }
                }
                RepositoryState::Absent => {
                    lines.push(format!("STATUS {} {}", name, output.paint("missing", Tone::Error)));
                }
                RepositoryState::Unknown(e) => {
                    let failed = format!("failed: {}", e);
                    lines.push(format!("STATUS {} {}", name, output.paint(&failed, Tone::Error)));
                }
            }
        }

        let analysis = &self.analysis;
        if !analysis.orphan_dirs.is_empty() {
            lines.push(String::new());
            for orphan in &analysis.orphan_dirs {
                lines.push(format!("{} {}", output.paint("ORPHAN!", Tone::Warning), orphan));
            }
        }

        if !analysis.unsatisfied_deps.is_empty() {
            lines.push(String::new());
            for (name, dependents) in &analysis.unsatisfied_deps {
                let dependents: Vec<&str> = dependents.iter().map(String::as_str).collect();
                lines.push(format!(
                    "{} {} used by {}",
                    output.paint("MISSING!", Tone::Error),
                    name,
                    dependents.join(", ")
                ));
            }
        }

        let failed = if analysis.failed_count > 0 {
            format!(", {} failed", analysis.failed_count)
        } else {
            String::new()
        };
        lines.push(String::new());
        lines.push(format!(
            "repositories: {} modified, {} missing, {} orphans{}.",
            analysis.modified_count,
            analysis.missing_count,
            analysis.orphan_dirs.len(),
            failed
        ));

        lines.join("\n")
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&OutputConfig::without_color()))
    }
}
