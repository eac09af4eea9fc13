//! `docsee status [name]`: compare recorded commits with upstream heads.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use docsee_sync::{check_all, SourceStatus, StatusEntry};

use super::{load_config, print_retry_hint, RemoteArgs};

/// Arguments for `docsee status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Name of the source to check (omit to check every source).
    pub name: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

#[derive(Serialize)]
struct StatusJson<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a SourceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a StatusEntry> for StatusJson<'a> {
    fn from(entry: &'a StatusEntry) -> Self {
        Self {
            name: &entry.name,
            status: entry.status.as_ref().ok(),
            error: entry.status.as_ref().err().map(|e| e.to_string()),
        }
    }
}

impl StatusArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let config = load_config(root)?;
        let client = self.remote.client()?;
        let entries = check_all(&client, &config, self.name.as_deref())?;

        if self.json {
            let rows: Vec<StatusJson<'_>> = entries.iter().map(StatusJson::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for entry in &entries {
                print_entry(entry);
            }
        }

        print_retry_hint(entries.iter().filter_map(|e| e.status.as_ref().err()));

        let attention = entries
            .iter()
            .filter(|e| e.status.as_ref().map_or(true, SourceStatus::needs_sync))
            .count();
        if attention > 0 {
            bail!("{attention} of {} sources need attention", entries.len());
        }
        Ok(())
    }
}

fn print_entry(entry: &StatusEntry) {
    match &entry.status {
        Ok(status @ SourceStatus::UpToDate { .. }) => {
            println!("{}: {}", entry.name, status.to_string().green())
        }
        Ok(status) => println!("{}: {}", entry.name, status.to_string().yellow()),
        Err(err) => eprintln!("{}: {}", entry.name, err.to_string().red()),
    }
}
