//! Remote file resolution: which entries of a tree listing belong to a source
//! and where they land inside the mirror.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use docsee_core::normalize_root;
use docsee_remote::{EntryKind, RemoteEntry};

use crate::filter::is_eligible;

/// A remote file in scope for a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Full path inside the remote repository.
    pub remote_path: String,
    /// `/`-separated path relative to the mirror directory.
    pub relative_path: String,
}

/// Select the eligible files under `root` and map them to mirror-relative paths.
///
/// Output is sorted by relative path and duplicate-free. An empty result is
/// not an error.
pub fn resolve(listing: &[RemoteEntry], root: &str) -> Vec<ResolvedFile> {
    let prefix = format!("{}/", normalize_root(root));
    let mut seen = BTreeSet::new();
    let mut files: Vec<ResolvedFile> = listing
        .iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .filter_map(|entry| {
            let relative = entry.path.strip_prefix(&prefix)?;
            if !is_eligible(relative) {
                return None;
            }
            if !is_contained(relative) {
                tracing::warn!("skipping remote path outside the mirror: {}", entry.path);
                return None;
            }
            Some(ResolvedFile {
                remote_path: entry.path.clone(),
                relative_path: relative.to_string(),
            })
        })
        .filter(|file| seen.insert(file.relative_path.clone()))
        .collect();
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    files
}

/// The set of mirror-relative paths that must exist after a sync.
pub fn expected_paths(files: &[ResolvedFile]) -> BTreeSet<String> {
    files.iter().map(|f| f.relative_path.clone()).collect()
}

/// True if `root` is a directory in the listing or has any descendant entry.
pub fn root_exists(listing: &[RemoteEntry], root: &str) -> bool {
    let root = normalize_root(root);
    let prefix = format!("{root}/");
    listing.iter().any(|entry| {
        (entry.kind == EntryKind::Directory && entry.path == root) || entry.path.starts_with(&prefix)
    })
}

/// Relative path made only of plain components: no `..`, no absolute prefix.
fn is_contained(relative: &str) -> bool {
    !relative.is_empty()
        && Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
