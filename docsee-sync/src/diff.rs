//! Upstream changes since the last sync, scoped to a source's subtree.

use docsee_core::{Config, Source};
use docsee_remote::{FileChange, RemoteRepo, RepoRef};

use crate::error::SyncError;

/// Result of diffing one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// No recorded commit to compare from.
    NeverSynced,
    /// Changed files under the source root; empty when nothing changed.
    Changes(Vec<FileChange>),
}

/// List files changed under `source.path` between the recorded commit and
/// the branch head.
pub fn diff_source<R: RemoteRepo + ?Sized>(
    remote: &R,
    source: &Source,
) -> Result<DiffOutcome, SyncError> {
    let Some(base) = source.commit.as_deref() else {
        return Ok(DiffOutcome::NeverSynced);
    };
    let repo = RepoRef::parse(&source.repo)?;
    let prefix = format!("{}/", source.path);
    let changes = remote
        .compare(&repo, base, &source.branch)?
        .into_iter()
        .filter(|change| change.path.starts_with(&prefix))
        .collect();
    Ok(DiffOutcome::Changes(changes))
}

/// Diff of one source, or the error that prevented it.
#[derive(Debug)]
pub struct DiffEntry {
    pub name: String,
    pub outcome: Result<DiffOutcome, SyncError>,
}

/// Diff every selected source independently.
pub fn diff_all<R: RemoteRepo + ?Sized>(
    remote: &R,
    config: &Config,
    name: Option<&str>,
) -> Result<Vec<DiffEntry>, SyncError> {
    Ok(config
        .select(name)?
        .into_iter()
        .map(|source| DiffEntry {
            name: source.name.0.clone(),
            outcome: diff_source(remote, source),
        })
        .collect())
}

/// One change as printed by `docsee diff`: status label padded to ten columns.
pub fn format_change(change: &FileChange) -> String {
    format!("  {:<10} {}", format!("{}:", change.status), change.path)
}
