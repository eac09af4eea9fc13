//! Mirror reconciliation: write expected files, delete orphaned ones.
//!
//! After [`materialize`] followed by [`prune`], the set of eligible files
//! under the mirror equals the expected set exactly. Files with other
//! extensions are never touched, and empty directories may remain.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{io_err, walk_err, SyncError};
use crate::fetch::run_bounded;
use crate::filter::is_eligible;
use crate::resolve::ResolvedFile;
use crate::writer::atomic_write;

/// An eligible file currently present under a mirror directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorFile {
    /// `/`-separated path relative to the mirror root.
    pub relative: String,
    pub path: PathBuf,
}

/// Every eligible file under `root`, sorted by relative path.
///
/// A missing `root` yields no files.
pub fn eligible_files(root: &Path) -> Result<Vec<MirrorFile>, SyncError> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| walk_err(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if !is_eligible(&relative) {
            continue;
        }
        files.push(MirrorFile {
            relative,
            path: entry.into_path(),
        });
    }
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

/// Fetch every expected file and write it under `local`.
///
/// Existing files are overwritten unconditionally. Fetches run through the
/// bounded scheduler; the first failure aborts the remaining work and is
/// returned, leaving the mirror possibly half-updated.
pub fn materialize<F>(
    local: &Path,
    files: &[ResolvedFile],
    concurrency: usize,
    fetch: F,
) -> Result<(), SyncError>
where
    F: Fn(&ResolvedFile) -> Result<String, SyncError> + Sync,
{
    run_bounded(files, concurrency, |file| {
        let content = fetch(file)?;
        let target = file
            .relative_path
            .split('/')
            .fold(local.to_path_buf(), |acc, part| acc.join(part));
        atomic_write(&target, &content)?;
        tracing::debug!("mirrored: {}", target.display());
        Ok(())
    })
}

/// Delete every eligible file under `local` whose relative path is not in
/// `expected`. Returns the relative paths removed.
pub fn prune(local: &Path, expected: &BTreeSet<String>) -> Result<Vec<String>, SyncError> {
    let mut removed = Vec::new();
    for file in eligible_files(local)? {
        if expected.contains(&file.relative) {
            continue;
        }
        std::fs::remove_file(&file.path).map_err(|e| io_err(&file.path, e))?;
        tracing::debug!("removed: {}", file.path.display());
        removed.push(file.relative);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn resolved(rel: &str) -> ResolvedFile {
        ResolvedFile {
            remote_path: format!("docs/{rel}"),
            relative_path: rel.to_string(),
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn eligible_files_of_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(eligible_files(&tmp.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn eligible_files_skips_other_extensions_and_uses_slashes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.md", "");
        touch(tmp.path(), "b/c.mdx", "");
        touch(tmp.path(), "b/logo.png", "");
        let rels: Vec<_> = eligible_files(tmp.path())
            .unwrap()
            .into_iter()
            .map(|f| f.relative)
            .collect();
        assert_eq!(rels, vec!["a.md", "b/c.mdx"]);
    }

    #[test]
    fn materialize_writes_nested_files() {
        let tmp = TempDir::new().unwrap();
        let local = tmp.path().join("mirror");
        let files = vec![resolved("a.md"), resolved("b/c.md")];
        materialize(&local, &files, 2, |f| Ok(format!("# {}", f.remote_path))).unwrap();
        assert_eq!(fs::read_to_string(local.join("a.md")).unwrap(), "# docs/a.md");
        assert_eq!(fs::read_to_string(local.join("b/c.md")).unwrap(), "# docs/b/c.md");
    }

    #[test]
    fn materialize_overwrites_existing_content() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.md", "stale");
        materialize(tmp.path(), &[resolved("a.md")], 1, |_| Ok("fresh".to_string())).unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("a.md")).unwrap(), "fresh");
    }

    #[test]
    fn prune_removes_orphans_and_keeps_other_types() {
        let tmp = TempDir::new().unwrap();
        for rel in ["a.md", "b/c.md", "old.md", "keep.png"] {
            touch(tmp.path(), rel, "x");
        }
        let removed = prune(tmp.path(), &set(&["a.md", "b/c.md"])).unwrap();
        assert_eq!(removed, vec!["old.md"]);
        assert!(tmp.path().join("a.md").exists());
        assert!(tmp.path().join("b/c.md").exists());
        assert!(tmp.path().join("keep.png").exists());
        assert!(!tmp.path().join("old.md").exists());
    }

    #[test]
    fn prune_of_missing_mirror_is_noop() {
        let tmp = TempDir::new().unwrap();
        let removed = prune(&tmp.path().join("never-synced"), &set(&["a.md"])).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn prune_leaves_empty_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gone/old.md", "x");
        prune(tmp.path(), &BTreeSet::new()).unwrap();
        assert!(tmp.path().join("gone").is_dir());
        assert!(eligible_files(tmp.path()).unwrap().is_empty());
    }
}
