//! Subcommand implementations, one module per command.

pub mod add;
pub mod diff;
pub mod init;
pub mod status;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use docsee_core::{registry, Config};
use docsee_remote::GitHubClient;
use docsee_sync::{SyncError, WriteResult};

/// Options shared by every command that talks to GitHub.
#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// GitHub token for higher rate limits.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl RemoteArgs {
    pub fn client(&self) -> Result<GitHubClient> {
        GitHubClient::new(self.token.clone()).context("failed to build GitHub client")
    }
}

/// Load `docsee.yaml` from `root`; a missing file points the user at `init`.
pub fn load_config(root: &Path) -> Result<Config> {
    registry::load_at(root).context("failed to load docsee.yaml")
}

/// Suggest retrying when any failure was a network or rate-limit problem.
pub fn print_retry_hint<'a>(errors: impl IntoIterator<Item = &'a SyncError>) {
    if errors.into_iter().any(SyncError::is_transient) {
        eprintln!(
            "{} network or rate-limit failure; retry later (GITHUB_TOKEN raises the rate limit)",
            "hint:".yellow()
        );
    }
}

/// Mention the shared document when a sync rewrote it.
pub fn print_document(result: &WriteResult) {
    if let WriteResult::Written { .. } = result {
        println!("  updated {}", result.path().display());
    }
}
