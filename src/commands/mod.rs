//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `neige`
//! command-line tool, one file per command.
//!
//! Each command receives an already-loaded [`Project`] (except `init`, which
//! creates one) and the backend to drive. Commands that act on several
//! dependencies print one status line per dependency as it is processed and
//! fail at the end if any of them failed, so one broken repository never
//! stops the rest of the batch.

use anyhow::{bail, Result};

use neige::lifecycle::{BatchReport, Outcome};

pub mod get;
pub mod git;
pub mod init;
pub mod status;
pub mod tag;
pub mod untag;
pub mod update;

/// Runs `op` for every name, printing `<VERB> <name> [<detail>] <outcome>`.
///
/// Returns an error summarising the failures once every name was processed.
pub fn drive<F>(verb: &str, detail: Option<&str>, names: &[String], mut op: F) -> Result<()>
where
    F: FnMut(&str) -> Outcome,
{
    let mut report = BatchReport::new();
    for name in names {
        let outcome = op(name.as_str());
        match detail {
            Some(detail) => println!("{} {} {} {}", verb, name, detail, outcome),
            None => println!("{} {} {}", verb, name, outcome),
        }
        report.record(name.as_str(), outcome);
    }
    finish(verb, &report)
}

fn finish(verb: &str, report: &BatchReport) -> Result<()> {
    let failures = report.failures();
    if failures > 0 {
        bail!(
            "{} failed for {} of {} dependencies",
            verb.to_lowercase(),
            failures,
            report.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neige::error::Error;
    use neige::lifecycle::SkipReason;

    #[test]
    fn test_drive_visits_every_name_despite_failures() {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut visited = Vec::new();

        let result = drive("GET", None, &names, |name| {
            visited.push(name.to_string());
            if name == "a" {
                Outcome::Failed(Error::UnknownDependency {
                    name: name.to_string(),
                })
            } else {
                Outcome::Skipped(SkipReason::AlreadyPresent)
            }
        });

        assert_eq!(visited, names);
        let err = result.unwrap_err().to_string();
        assert_eq!(err, "get failed for 1 of 3 dependencies");
    }

    #[test]
    fn test_drive_succeeds_when_nothing_failed() {
        let names = vec!["a".to_string()];
        assert!(drive("UPDATE", None, &names, |_| Outcome::Completed).is_ok());
        assert!(drive("TAG", Some("app-1.0.0"), &[], |_| Outcome::Completed).is_ok());
    }
}
