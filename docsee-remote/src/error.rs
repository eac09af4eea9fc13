//! Error types for docsee-remote.

use thiserror::Error;

/// Failures surfaced by a remote repository client.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Repository, branch, commit or path absent upstream.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// API quota exhausted.
    #[error("GitHub API rate limit exceeded. Set GITHUB_TOKEN env var for higher limits.")]
    RateLimited,

    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success HTTP status.
    #[error("{what}: HTTP {status} {message}")]
    Status {
        what: String,
        status: u16,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("invalid response for {what}: {message}")]
    Decode { what: String, message: String },

    /// The API returned an incomplete listing; syncing from it would prune
    /// files that still exist upstream.
    #[error("listing for {what} was truncated by the API")]
    Truncated { what: String },

    /// A repository reference that is not `owner/name`.
    #[error("invalid repository reference '{0}'; expected owner/name")]
    InvalidRepo(String),

    /// A base URL that cannot carry path segments.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl RemoteError {
    /// Failures worth retrying later without changing anything locally.
    pub fn is_transient(&self) -> bool {
        matches!(self, RemoteError::Network(_) | RemoteError::RateLimited)
    }
}
