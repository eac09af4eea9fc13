//! `docsee diff [name]`: list upstream changes since the last sync.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use docsee_sync::{diff::format_change, diff_all, DiffOutcome};

use super::{load_config, print_retry_hint, RemoteArgs};

/// Arguments for `docsee diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Name of the source to diff (omit to diff every source).
    pub name: Option<String>,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

impl DiffArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let config = load_config(root)?;
        let client = self.remote.client()?;
        let entries = diff_all(&client, &config, self.name.as_deref())?;

        let mut failed = 0;
        for entry in &entries {
            match &entry.outcome {
                Ok(DiffOutcome::NeverSynced) => {
                    println!("{}: never synced, run 'docsee sync'", entry.name)
                }
                Ok(DiffOutcome::Changes(changes)) if changes.is_empty() => {
                    println!("{}: no changes", entry.name)
                }
                Ok(DiffOutcome::Changes(changes)) => {
                    println!("{}:", entry.name);
                    for change in changes {
                        println!("{}", format_change(change));
                    }
                }
                Err(err) => {
                    failed += 1;
                    eprintln!("{}: {err}", entry.name);
                }
            }
        }

        print_retry_hint(entries.iter().filter_map(|e| e.outcome.as_ref().err()));

        if failed > 0 {
            bail!("{failed} of {} sources could not be diffed", entries.len());
        }
        Ok(())
    }
}
