//! Parsing of GitHub "tree" URLs into repo / branch / path.

use url::Url;

use crate::types::RepoRef;

/// Components of `https://github.com/<owner>/<repo>/tree/<branch>/<path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSource {
    pub repo: RepoRef,
    pub branch: String,
    /// Subdirectory inside the repository, without trailing slash.
    pub path: String,
}

/// Parse a GitHub tree URL. The scheme is optional and a `.git` suffix on the
/// repository name is dropped. Returns `None` for anything else, including a
/// URL that points at the repository root.
pub fn parse_source_url(input: &str) -> Option<ParsedSource> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme).ok()?;
    if url.host_str()? != "github.com" {
        return None;
    }

    let mut segments = url.path_segments()?;
    let owner = segments.next()?;
    let repo_name = segments.next()?;
    if segments.next()? != "tree" {
        return None;
    }
    let branch = segments.next().filter(|b| !b.is_empty())?;
    let path = segments.collect::<Vec<_>>().join("/");
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        return None;
    }

    let repo_name = repo_name.strip_suffix(".git").unwrap_or(repo_name);
    let repo = RepoRef::parse(&format!("{owner}/{repo_name}")).ok()?;
    Some(ParsedSource {
        repo,
        branch: branch.to_string(),
        path: path.to_string(),
    })
}
