//! `docsee sync [name]`: download docs and regenerate index blocks.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use docsee_core::short_sha;
use docsee_sync::{pipeline, SyncOptions, SyncScope, DEFAULT_CONCURRENCY};

use super::{load_config, print_document, print_retry_hint, RemoteArgs};

/// Arguments for `docsee sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Name of the source to sync (omit to sync every source).
    pub name: Option<String>,

    /// Maximum parallel file downloads per source.
    #[arg(long, short = 'j', default_value_t = DEFAULT_CONCURRENCY)]
    pub jobs: usize,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

impl SyncArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let mut config = load_config(root)?;
        if self.name.is_none() && config.sources.is_empty() {
            println!("No sources in docsee.yaml. Run `docsee add` first.");
            return Ok(());
        }
        let client = self.remote.client()?;
        let options = SyncOptions {
            concurrency: self.jobs,
        };
        let scope = SyncScope::from_name(self.name);

        let report = pipeline::run(root, &client, &mut config, &scope, options)
            .context("sync failed")?;

        for entry in &report.results {
            match &entry.outcome {
                Ok(synced) => {
                    println!(
                        "{} {}: synced {} files ({})",
                        "✓".green(),
                        synced.name,
                        synced.file_count,
                        short_sha(&synced.commit)
                    );
                    print_document(&synced.document);
                }
                Err(err) => eprintln!("{} {}: {err}", "✗".red(), entry.name),
            }
        }
        print_retry_hint(report.failures().map(|(_, err)| err));

        let failed = report.failures().count();
        if failed > 0 {
            bail!("{failed} of {} sources failed to sync", report.results.len());
        }
        Ok(())
    }
}
