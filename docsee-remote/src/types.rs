//! Remote repository types and the [`RemoteRepo`] collaborator trait.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::RemoteError;

// ---------------------------------------------------------------------------
// RepoRef
// ---------------------------------------------------------------------------

/// `owner/name` reference to a remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse `owner/name`. Both parts must be non-empty and consist of
    /// ASCII letters, digits, `_`, `.` or `-`.
    pub fn parse(input: &str) -> Result<Self, RemoteError> {
        let invalid = || RemoteError::InvalidRepo(input.to_string());
        let (owner, name) = input.trim().split_once('/').ok_or_else(invalid)?;
        if !is_valid_part(owner) || !is_valid_part(name) {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

impl FromStr for RepoRef {
    type Err = RemoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// ---------------------------------------------------------------------------
// Listing and comparison entries
// ---------------------------------------------------------------------------

/// Kind of an entry in a recursive tree listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Submodule commits and anything else that is neither.
    Other,
}

/// One entry of a tree listing at a specific commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Full path from the repository root, `/`-separated.
    pub path: String,
    pub kind: EntryKind,
}

impl RemoteEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// How a file changed between two revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Other,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Removed => "removed",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Renamed => "renamed",
            ChangeStatus::Copied => "copied",
            ChangeStatus::Changed => "changed",
            ChangeStatus::Unchanged => "unchanged",
            ChangeStatus::Other => "other",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One changed file between two revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub status: ChangeStatus,
}

// ---------------------------------------------------------------------------
// Collaborator trait
// ---------------------------------------------------------------------------

/// Read-only access to a remote repository host.
///
/// Implementations must be shareable across fetch workers.
pub trait RemoteRepo: Send + Sync {
    /// Name of the repository's default branch.
    fn default_branch(&self, repo: &RepoRef) -> Result<String, RemoteError>;

    /// Head commit id of `reference` (branch, tag or sha).
    fn latest_commit(&self, repo: &RepoRef, reference: &str) -> Result<String, RemoteError>;

    /// Recursive listing of every entry at `commit`.
    fn list_tree(&self, repo: &RepoRef, commit: &str) -> Result<Vec<RemoteEntry>, RemoteError>;

    /// Text content of the file at `path` in `commit`.
    fn fetch_file(&self, repo: &RepoRef, commit: &str, path: &str) -> Result<String, RemoteError>;

    /// Files changed between `base` and `head`.
    fn compare(&self, repo: &RepoRef, base: &str, head: &str)
        -> Result<Vec<FileChange>, RemoteError>;
}
