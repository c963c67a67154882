//! # Init Command Implementation
//!
//! Creates an empty `neige.json` in the project directory. An existing
//! manifest is never overwritten: the command reports that it ignored the
//! request and still succeeds, so running it twice is harmless.

use std::path::Path;

use anyhow::Result;

use neige::defaults::MANIFEST_FILE;
use neige::error::Error;
use neige::manifest::Manifest;

/// Execute the `init` command.
pub fn execute(dir: &Path) -> Result<()> {
    match Manifest::init(dir) {
        Ok(_) => {
            println!("creating {}", MANIFEST_FILE);
            Ok(())
        }
        Err(Error::PathConflict { .. }) => {
            println!("ignored: existing {} file found", MANIFEST_FILE);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
