//! Registering a new source and performing its first sync.

use std::path::Path;

use docsee_core::{normalize_root, registry, Config, Source, SourceName};
use docsee_remote::{parse_source_url, RemoteError, RemoteRepo, RepoRef};

use crate::error::SyncError;
use crate::pipeline::{record_commit, sync_source, SyncContext, SyncOptions, SyncedSource};
use crate::resolve::root_exists;

/// Docs directory assumed when `owner/repo` is given without a path.
pub const DEFAULT_DOCS_PATH: &str = "docs";

/// A source to add, before anything is resolved against the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub repo: RepoRef,
    pub path: String,
    /// `None` tracks the repository's default branch.
    pub branch: Option<String>,
    /// `None` names the source after the repository.
    pub name: Option<String>,
}

impl AddRequest {
    /// Build a request from a GitHub tree URL or a bare `owner/repo`.
    ///
    /// Explicit `path` / `branch` override whatever the URL carries.
    pub fn parse(
        input: &str,
        path: Option<String>,
        branch: Option<String>,
        name: Option<String>,
    ) -> Result<Self, RemoteError> {
        let request = match parse_source_url(input) {
            Some(parsed) => Self {
                repo: parsed.repo,
                path: path.unwrap_or(parsed.path),
                branch: branch.or(Some(parsed.branch)),
                name,
            },
            None => Self {
                repo: RepoRef::parse(input)?,
                path: path.unwrap_or_else(|| DEFAULT_DOCS_PATH.to_string()),
                branch,
                name,
            },
        };
        Ok(Self {
            path: normalize_root(&request.path).to_string(),
            ..request
        })
    }

    pub fn source_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.repo.name)
    }
}

/// Resolve, register and sync a new source.
///
/// The source is saved to `docsee.yaml` before the first sync so a failed
/// download leaves it registered as never synced; `docsee sync` retries it.
pub fn add_source<R: RemoteRepo + ?Sized>(
    root: &Path,
    remote: &R,
    config: &mut Config,
    request: &AddRequest,
    options: SyncOptions,
) -> Result<SyncedSource, SyncError> {
    SourceName::from(request.source_name()).validate()?;
    let repo = &request.repo;
    let branch = match &request.branch {
        Some(branch) => branch.clone(),
        None => remote.default_branch(repo)?,
    };
    let commit = remote.latest_commit(repo, &branch)?;
    let listing = remote.list_tree(repo, &commit)?;
    if !root_exists(&listing, &request.path) {
        return Err(SyncError::PathNotFound {
            repo: repo.to_string(),
            path: request.path.clone(),
        });
    }

    let source = Source::new(request.source_name(), repo.to_string(), &request.path, branch);
    config.add_source(source.clone())?;
    registry::save_at(root, config)?;
    tracing::info!("added source {} ({repo}/{})", source.name, source.path);

    let ctx = SyncContext::new(root, config, remote, options);
    let synced = sync_source(&ctx, &source, &commit)?;
    record_commit(root, config, &source.name.0, &synced.commit)?;
    Ok(synced)
}
