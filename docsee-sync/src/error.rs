//! Error types for docsee-sync.

use std::path::PathBuf;

use thiserror::Error;

use docsee_core::error::ConfigError;
use docsee_remote::RemoteError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the remote repository client.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// An error from the config registry.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fetch worker pool could not be started.
    #[error("failed to start fetch workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// The shared document holds a start marker with no end marker after it.
    #[error("{path} contains {marker} without a matching end marker; fix the block by hand")]
    UnterminatedBlock { path: PathBuf, marker: String },

    /// The source's root path does not exist in the remote tree.
    #[error("path '{path}' not found in {repo}")]
    PathNotFound { repo: String, path: String },
}

impl SyncError {
    /// Network and rate-limit failures: nothing is wrong locally, retry later.
    pub fn is_transient(&self) -> bool {
        matches!(self, SyncError::Remote(e) if e.is_transient())
    }
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Convert a directory-walk failure, keeping the offending path.
pub(crate) fn walk_err(root: &std::path::Path, err: walkdir::Error) -> SyncError {
    let path = err
        .path()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| root.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    io_err(path, source)
}
