//! Per-source sync and the batch entrypoint used by `docsee sync`.
//!
//! One source sync runs: list tree → resolve → materialize → prune →
//! build index → inject block. Any failure aborts that source before the
//! next stage, so a failed fetch never prunes and never touches the document.

use std::path::{Path, PathBuf};

use docsee_core::{registry, short_sha, Config, ConfigError, Source};
use docsee_remote::{RemoteRepo, RepoRef};

use crate::error::SyncError;
use crate::fetch::DEFAULT_CONCURRENCY;
use crate::index::build_index;
use crate::inject::inject_block;
use crate::mirror::{materialize, prune};
use crate::resolve::{expected_paths, resolve};
use crate::writer::WriteResult;

/// Tunables for a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Maximum number of file fetches in flight.
    pub concurrency: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Everything a source sync needs besides the source itself.
pub struct SyncContext<'a, R: RemoteRepo + ?Sized> {
    /// Project root; relative mirror paths resolve against it.
    pub root: &'a Path,
    /// Shared document receiving the index blocks.
    pub document: PathBuf,
    pub remote: &'a R,
    pub options: SyncOptions,
}

impl<'a, R: RemoteRepo + ?Sized> SyncContext<'a, R> {
    pub fn new(root: &'a Path, config: &Config, remote: &'a R, options: SyncOptions) -> Self {
        Self {
            root,
            document: config.agents_md_path(root),
            remote,
            options,
        }
    }
}

/// Result of one successful source sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedSource {
    pub name: String,
    /// Revision the mirror now reflects.
    pub commit: String,
    /// Number of files mirrored.
    pub file_count: usize,
    /// Mirror-relative paths deleted as orphans.
    pub removed: Vec<String>,
    pub document: WriteResult,
}

/// Bring the mirror and index block of `source` in line with `commit`.
///
/// Never mutates `source`; recording the new commit is up to the caller.
/// A name or mirror path that could overlap another mirror is rejected
/// before anything is fetched or deleted.
pub fn sync_source<R: RemoteRepo + ?Sized>(
    ctx: &SyncContext<'_, R>,
    source: &Source,
    commit: &str,
) -> Result<SyncedSource, SyncError> {
    source.name.validate()?;
    let local = source.mirror_dir(ctx.root)?;
    let repo = RepoRef::parse(&source.repo)?;
    let listing = ctx.remote.list_tree(&repo, commit)?;
    let files = resolve(&listing, &source.path);

    materialize(&local, &files, ctx.options.concurrency, |file| {
        Ok(ctx.remote.fetch_file(&repo, commit, &file.remote_path)?)
    })?;
    let removed = prune(&local, &expected_paths(&files))?;

    let index = build_index(&local)?;
    let document = inject_block(ctx.root, &ctx.document, source, &index)?;

    tracing::info!(
        "synced {}: {} files, {} removed ({})",
        source.name,
        files.len(),
        removed.len(),
        short_sha(commit)
    );
    Ok(SyncedSource {
        name: source.name.0.clone(),
        commit: commit.to_string(),
        file_count: files.len(),
        removed,
        document,
    })
}

/// Which sources a batch run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Every source in `docsee.yaml`.
    All,
    /// A single named source.
    Source(String),
}

impl SyncScope {
    pub fn from_name(name: Option<String>) -> Self {
        name.map_or(SyncScope::All, SyncScope::Source)
    }

    fn name(&self) -> Option<&str> {
        match self {
            SyncScope::All => None,
            SyncScope::Source(name) => Some(name),
        }
    }
}

/// Outcome of one source within a batch.
#[derive(Debug)]
pub struct SourceReport {
    pub name: String,
    pub outcome: Result<SyncedSource, SyncError>,
}

/// Per-source outcomes of a batch, in config order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<SourceReport>,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &SyncError)> {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.name.as_str(), e)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Sync every source in `scope` against its branch head.
///
/// Sources are isolated: a failure is recorded in the report and the next
/// source is attempted. Each success advances that source's commit and saves
/// `docsee.yaml` right away. Only an unknown source name fails the whole call.
pub fn run<R: RemoteRepo + ?Sized>(
    root: &Path,
    remote: &R,
    config: &mut Config,
    scope: &SyncScope,
    options: SyncOptions,
) -> Result<BatchReport, SyncError> {
    let names: Vec<String> = config
        .select(scope.name())?
        .into_iter()
        .map(|s| s.name.0.clone())
        .collect();
    let ctx = SyncContext::new(root, config, remote, options);

    let mut report = BatchReport::default();
    for name in names {
        let outcome = sync_one(&ctx, config, &name);
        if let Err(err) = &outcome {
            tracing::warn!("sync failed for {name}: {err}");
        }
        report.results.push(SourceReport { name, outcome });
    }
    Ok(report)
}

fn sync_one<R: RemoteRepo + ?Sized>(
    ctx: &SyncContext<'_, R>,
    config: &mut Config,
    name: &str,
) -> Result<SyncedSource, SyncError> {
    let source = config
        .find_source(name)
        .cloned()
        .ok_or_else(|| ConfigError::SourceNotFound {
            name: name.to_string(),
        })?;
    let repo = RepoRef::parse(&source.repo)?;
    let commit = ctx.remote.latest_commit(&repo, &source.branch)?;
    let synced = sync_source(ctx, &source, &commit)?;
    record_commit(ctx.root, config, name, &synced.commit)?;
    Ok(synced)
}

/// Advance the recorded commit of `name` and persist the registry.
pub fn record_commit(
    root: &Path,
    config: &mut Config,
    name: &str,
    commit: &str,
) -> Result<(), SyncError> {
    let source = config
        .find_source_mut(name)
        .ok_or_else(|| ConfigError::SourceNotFound {
            name: name.to_string(),
        })?;
    source.commit = Some(commit.to_string());
    registry::save_at(root, config)?;
    Ok(())
}
