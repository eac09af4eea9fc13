//! [`RemoteRepo`] over the GitHub REST API and raw.githubusercontent.com.
//!
//! Blocking `ureq` agent, shared by every fetch worker. The token, if any, is
//! passed in by the caller; nothing here reads the environment.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::RemoteError;
use crate::types::{ChangeStatus, EntryKind, FileChange, RemoteEntry, RemoteRepo, RepoRef};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

const USER_AGENT: &str = "docsee";
const TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    #[serde(default)]
    path: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    files: Vec<CompareFile>,
}

#[derive(Debug, Deserialize)]
struct CompareFile {
    filename: String,
    status: ChangeStatus,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// GitHub-backed remote client.
pub struct GitHubClient {
    agent: ureq::Agent,
    api_base: Url,
    raw_base: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Client against the public GitHub endpoints.
    pub fn new(token: Option<String>) -> Result<Self, RemoteError> {
        Self::with_base_urls(DEFAULT_API_BASE, DEFAULT_RAW_BASE, token)
    }

    /// Client against custom API / raw-content endpoints (e.g. GitHub Enterprise).
    pub fn with_base_urls(
        api_base: &str,
        raw_base: &str,
        token: Option<String>,
    ) -> Result<Self, RemoteError> {
        let parse = |s: &str| Url::parse(s).map_err(|e| RemoteError::InvalidUrl(format!("{s}: {e}")));
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Ok(Self {
            agent,
            api_base: parse(api_base)?,
            raw_base: parse(raw_base)?,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn api_url(&self, repo: &RepoRef, tail: &str) -> Result<Url, RemoteError> {
        let path = format!("repos/{}/{}/{tail}", repo.owner, repo.name);
        join_segments(&self.api_base, &path)
    }

    fn request(&self, url: &Url) -> ureq::Request {
        let req = self.agent.get(url.as_str());
        match &self.token {
            Some(token) => req.set("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url, what: &str) -> Result<T, RemoteError> {
        tracing::debug!("GET {url}");
        let response = self
            .request(url)
            .set("Accept", "application/vnd.github+json")
            .call()
            .map_err(|e| map_ureq_error(e, what))?;
        response.into_json().map_err(|e| RemoteError::Decode {
            what: what.to_string(),
            message: e.to_string(),
        })
    }
}

impl RemoteRepo for GitHubClient {
    fn default_branch(&self, repo: &RepoRef) -> Result<String, RemoteError> {
        let url = join_segments(&self.api_base, &format!("repos/{}/{}", repo.owner, repo.name))?;
        let info: RepoInfo = self.get_json(&url, &format!("repository {repo}"))?;
        Ok(info.default_branch)
    }

    fn latest_commit(&self, repo: &RepoRef, reference: &str) -> Result<String, RemoteError> {
        let mut url = self.api_url(repo, "commits")?;
        url.query_pairs_mut()
            .append_pair("sha", reference)
            .append_pair("per_page", "1");
        let what = format!("commits for {repo} on {reference}");
        let commits: Vec<CommitInfo> = self.get_json(&url, &what)?;
        commits
            .into_iter()
            .next()
            .map(|c| c.sha)
            .ok_or(RemoteError::NotFound { what })
    }

    fn list_tree(&self, repo: &RepoRef, commit: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        let mut url = self.api_url(repo, &format!("git/trees/{commit}"))?;
        url.query_pairs_mut().append_pair("recursive", "1");
        let what = format!("tree of {repo}@{commit}");
        let response: TreeResponse = self.get_json(&url, &what)?;
        tree_entries(response, &what)
    }

    fn fetch_file(&self, repo: &RepoRef, commit: &str, path: &str) -> Result<String, RemoteError> {
        let url = join_segments(
            &self.raw_base,
            &format!("{}/{}/{commit}/{path}", repo.owner, repo.name),
        )?;
        let what = format!("{path} in {repo}@{commit}");
        tracing::debug!("GET {url}");
        let response = self.request(&url).call().map_err(|e| map_ureq_error(e, &what))?;
        response.into_string().map_err(|e| RemoteError::Decode {
            what,
            message: e.to_string(),
        })
    }

    fn compare(
        &self,
        repo: &RepoRef,
        base: &str,
        head: &str,
    ) -> Result<Vec<FileChange>, RemoteError> {
        let url = self.api_url(repo, &format!("compare/{base}...{head}"))?;
        let response: CompareResponse =
            self.get_json(&url, &format!("comparison {base}...{head} in {repo}"))?;
        Ok(response
            .files
            .into_iter()
            .map(|f| FileChange {
                path: f.filename,
                status: f.status,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Append `/`-separated `path` to `base`, percent-encoding each segment.
fn join_segments(base: &Url, path: &str) -> Result<Url, RemoteError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| RemoteError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(path.split('/'));
    Ok(url)
}

/// Convert a tree response, refusing a truncated one.
fn tree_entries(response: TreeResponse, what: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
    if response.truncated {
        return Err(RemoteError::Truncated {
            what: what.to_string(),
        });
    }
    Ok(response
        .tree
        .into_iter()
        .map(|item| RemoteEntry {
            kind: tree_kind(item.kind.as_deref()),
            path: item.path,
        })
        .collect())
}

fn tree_kind(kind: Option<&str>) -> EntryKind {
    match kind {
        Some("blob") | None => EntryKind::File,
        Some("tree") => EntryKind::Directory,
        Some(_) => EntryKind::Other,
    }
}

fn map_ureq_error(err: ureq::Error, what: &str) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response.status_text().to_string();
            let body = response.into_string().unwrap_or_default();
            classify_status(status, &message, &body, what)
        }
        ureq::Error::Transport(transport) => RemoteError::Network(transport.to_string()),
    }
}

/// Map a non-success HTTP response onto the remote error taxonomy.
pub(crate) fn classify_status(status: u16, message: &str, body: &str, what: &str) -> RemoteError {
    match status {
        404 => RemoteError::NotFound {
            what: what.to_string(),
        },
        403 | 429 if body.to_lowercase().contains("rate limit") => RemoteError::RateLimited,
        _ => RemoteError::Status {
            what: what.to_string(),
            status,
            message: message.to_string(),
        },
    }
}
