//! `docsee add <source> [--path <dir>] [--branch <ref>] [--name <name>]`

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use docsee_core::{registry, short_sha};
use docsee_sync::{add_source, AddRequest, SyncOptions, DEFAULT_CONCURRENCY};

use super::{print_document, RemoteArgs};

/// Add a docs source and run its first sync.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// GitHub tree URL (https://github.com/owner/repo/tree/branch/path) or owner/repo.
    pub source: String,

    /// Docs directory inside the repository (default for owner/repo: docs).
    #[arg(long)]
    pub path: Option<String>,

    /// Branch to track (default: the URL's branch, else the repository default).
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Short name for this source (default: the repository name).
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Maximum parallel file downloads.
    #[arg(long, short = 'j', default_value_t = DEFAULT_CONCURRENCY)]
    pub jobs: usize,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

impl AddArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let request = AddRequest::parse(&self.source, self.path, self.branch, self.name)
            .with_context(|| {
                format!(
                    "invalid source '{}'; use a GitHub URL or owner/repo, e.g. \
                     https://github.com/vercel/ai/tree/main/content/docs",
                    self.source
                )
            })?;
        let mut config = registry::load_or_init_at(root).context("failed to load docsee.yaml")?;
        let client = self.remote.client()?;
        let options = SyncOptions {
            concurrency: self.jobs,
        };

        let synced = add_source(root, &client, &mut config, &request, options)
            .with_context(|| format!("failed to add '{}'", request.source_name()))?;

        println!(
            "{} {}: added and synced {} files ({})",
            "✓".green(),
            synced.name,
            synced.file_count,
            short_sha(&synced.commit)
        );
        print_document(&synced.document);
        Ok(())
    }
}
