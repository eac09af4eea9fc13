//! In-memory `RemoteRepo` used by the sync integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use docsee_remote::{FileChange, RemoteEntry, RemoteError, RemoteRepo, RepoRef};

pub const HEAD: &str = "1111111111111111111111111111111111111111";

/// A single-branch repository whose files live in a map.
pub struct FakeRemote {
    head: Mutex<String>,
    files: Mutex<BTreeMap<String, String>>,
    failing: Mutex<BTreeSet<String>>,
    pub changes: Vec<FileChange>,
    pub fetches: AtomicUsize,
    truncated: AtomicBool,
}

impl FakeRemote {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            head: Mutex::new(HEAD.to_string()),
            files: Mutex::new(
                files
                    .iter()
                    .map(|(p, c)| (p.to_string(), c.to_string()))
                    .collect(),
            ),
            failing: Mutex::new(BTreeSet::new()),
            changes: Vec::new(),
            fetches: AtomicUsize::new(0),
            truncated: AtomicBool::new(false),
        }
    }

    /// Make every fetch of `path` fail with a network error.
    pub fn fail_on(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    /// Report every tree listing as truncated.
    pub fn truncate_listings(&self) {
        self.truncated.store(true, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Replace the file set and move the head to `commit`.
    pub fn publish(&self, commit: &str, files: &[(&str, &str)]) {
        *self.head.lock().unwrap() = commit.to_string();
        *self.files.lock().unwrap() = files
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect();
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl RemoteRepo for FakeRemote {
    fn default_branch(&self, _repo: &RepoRef) -> Result<String, RemoteError> {
        Ok("main".to_string())
    }

    fn latest_commit(&self, repo: &RepoRef, reference: &str) -> Result<String, RemoteError> {
        if reference != "main" {
            return Err(RemoteError::NotFound {
                what: format!("branch {reference} of {repo}"),
            });
        }
        Ok(self.head.lock().unwrap().clone())
    }

    fn list_tree(&self, repo: &RepoRef, commit: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        if self.truncated.load(Ordering::SeqCst) {
            return Err(RemoteError::Truncated {
                what: format!("tree of {repo}@{commit}"),
            });
        }
        let files = self.files.lock().unwrap();
        let mut dirs = BTreeSet::new();
        for path in files.keys() {
            let mut parts: Vec<&str> = path.split('/').collect();
            parts.pop();
            for end in 1..=parts.len() {
                dirs.insert(parts[..end].join("/"));
            }
        }
        let mut entries: Vec<RemoteEntry> = dirs.into_iter().map(RemoteEntry::dir).collect();
        entries.extend(files.keys().cloned().map(RemoteEntry::file));
        Ok(entries)
    }

    fn fetch_file(&self, _repo: &RepoRef, _commit: &str, path: &str) -> Result<String, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(path) {
            return Err(RemoteError::Network(format!("connection reset fetching {path}")));
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound {
                what: path.to_string(),
            })
    }

    fn compare(
        &self,
        _repo: &RepoRef,
        _base: &str,
        _head: &str,
    ) -> Result<Vec<FileChange>, RemoteError> {
        Ok(self.changes.clone())
    }
}
