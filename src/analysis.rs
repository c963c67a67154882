//! # Dependency Graph Analysis
//!
//! Detects dependencies that are required by a checked-out dependency but not
//! declared by the current manifest.
//!
//! Each present dependency's own `neige.json` is read and every name it
//! declares is looked up in the current manifest. The check goes exactly one
//! level deep: the manifests of the dependencies' dependencies are never
//! opened, so cycles in the dependency relation are harmless.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::manifest::Manifest;
use crate::workspace;

/// Missing dependency name mapped to the declared dependencies that require it.
pub type Unsatisfied = BTreeMap<String, BTreeSet<String>>;

/// Finds names declared by present dependencies but missing from `manifest`.
///
/// A dependency whose own manifest cannot be parsed is logged and skipped,
/// so one broken checkout does not hide the findings for the others.
pub fn missing_dependencies(manifest: &Manifest) -> Unsatisfied {
    let mut missing = Unsatisfied::new();

    for dependent in workspace::present_dependencies(manifest) {
        let nested = match Manifest::load(&manifest.repo_dir(&dependent)) {
            Ok(nested) => nested,
            Err(e) => {
                warn!("skipping dependency analysis of {}: {}", dependent, e);
                continue;
            }
        };

        for (name, _) in nested.deps.iter() {
            if !manifest.deps.contains(name) {
                missing
                    .entry(name.to_string())
                    .or_default()
                    .insert(dependent.clone());
            }
        }
    }

    missing
}
