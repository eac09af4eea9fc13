//! # docsee-remote
//!
//! Read-only remote repository access consumed by the sync engine.
//!
//! [`RemoteRepo`] is the seam: the engine only ever talks to the trait, and
//! [`GitHubClient`] is the production implementation.

pub mod error;
pub mod github;
pub mod source_url;
pub mod types;

pub use error::RemoteError;
pub use github::GitHubClient;
pub use source_url::{parse_source_url, ParsedSource};
pub use types::{ChangeStatus, EntryKind, FileChange, RemoteEntry, RemoteRepo, RepoRef};
