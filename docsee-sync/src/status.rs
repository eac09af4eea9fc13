//! Upstream freshness of tracked sources.

use std::fmt;

use serde::Serialize;

use docsee_core::{short_sha, Config, Source};
use docsee_remote::{RemoteRepo, RepoRef};

use crate::error::SyncError;

/// Where a source stands relative to its branch head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SourceStatus {
    /// No successful sync recorded yet.
    NeverSynced,
    UpToDate { commit: String },
    Behind { local: String, remote: String },
}

impl SourceStatus {
    /// Anything other than up to date counts as needing attention.
    pub fn needs_sync(&self) -> bool {
        !matches!(self, SourceStatus::UpToDate { .. })
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceStatus::NeverSynced => write!(f, "never synced"),
            SourceStatus::UpToDate { commit } => write!(f, "up to date ({})", short_sha(commit)),
            SourceStatus::Behind { local, remote } => write!(
                f,
                "behind upstream (local: {} → remote: {})",
                short_sha(local),
                short_sha(remote)
            ),
        }
    }
}

/// Compare the recorded commit of `source` with its branch head.
///
/// A never-synced source is reported without contacting the remote.
pub fn check<R: RemoteRepo + ?Sized>(
    remote: &R,
    source: &Source,
) -> Result<SourceStatus, SyncError> {
    let Some(local) = source.commit.as_deref() else {
        return Ok(SourceStatus::NeverSynced);
    };
    let repo = RepoRef::parse(&source.repo)?;
    let head = remote.latest_commit(&repo, &source.branch)?;
    if head == local {
        Ok(SourceStatus::UpToDate { commit: head })
    } else {
        Ok(SourceStatus::Behind {
            local: local.to_string(),
            remote: head,
        })
    }
}

/// Status of one source, or the error that prevented checking it.
#[derive(Debug)]
pub struct StatusEntry {
    pub name: String,
    pub status: Result<SourceStatus, SyncError>,
}

/// Check every selected source; one failing check does not stop the others.
pub fn check_all<R: RemoteRepo + ?Sized>(
    remote: &R,
    config: &Config,
    name: Option<&str>,
) -> Result<Vec<StatusEntry>, SyncError> {
    Ok(config
        .select(name)?
        .into_iter()
        .map(|source| StatusEntry {
            name: source.name.0.clone(),
            status: check(remote, source),
        })
        .collect())
}
