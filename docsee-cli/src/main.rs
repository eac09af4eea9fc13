//! docsee — keep AGENTS.md docs indexes in sync with upstream repositories.
//!
//! # Usage
//!
//! ```text
//! docsee init
//! docsee add <github-tree-url | owner/repo> [--path <dir>] [--branch <ref>] [--name <name>]
//! docsee sync [name] [--jobs <n>]
//! docsee status [name] [--json]
//! docsee diff [name]
//! ```
//!
//! Every command acts on the project in `--dir` (default: the current
//! directory). `GITHUB_TOKEN` raises the GitHub API rate limit.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{
    add::AddArgs, diff::DiffArgs, init::InitArgs, status::StatusArgs, sync::SyncArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "docsee",
    version,
    about = "Keep AGENTS.md docs in sync with upstream repos",
    long_about = None,
)]
struct Cli {
    /// Project root holding docsee.yaml.
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create docsee.yaml.
    Init(InitArgs),

    /// Add a docs source and run its first sync.
    Add(AddArgs),

    /// Download docs and regenerate the AGENTS.md index.
    Sync(SyncArgs),

    /// Check whether local docs are behind upstream.
    Status(StatusArgs),

    /// Show what changed upstream since the last sync.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let root = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("could not determine current directory")?,
    };
    tracing::debug!("project root: {}", root.display());
    match cli.command {
        Commands::Init(args) => args.run(&root),
        Commands::Add(args) => args.run(&root),
        Commands::Sync(args) => args.run(&root),
        Commands::Status(args) => args.run(&root),
        Commands::Diff(args) => args.run(&root),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
