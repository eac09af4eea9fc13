//! # docsee-sync
//!
//! Mirror reconciliation, index generation and block injection.
//!
//! Call [`sync_source`] to bring one source's mirror and index block in line
//! with a given commit, or [`run`] to sync a batch of sources from
//! `docsee.yaml` against their branch heads.

pub mod add;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod index;
pub mod inject;
pub mod mirror;
pub mod pipeline;
pub mod resolve;
pub mod status;
pub mod writer;

pub use add::{add_source, AddRequest};
pub use diff::{diff_all, diff_source, DiffEntry, DiffOutcome};
pub use error::SyncError;
pub use fetch::{run_bounded, DEFAULT_CONCURRENCY};
pub use filter::is_eligible;
pub use index::build_index;
pub use inject::{build_block, ensure_ignored, inject_block, Markers};
pub use pipeline::{
    run, sync_source, BatchReport, SourceReport, SyncContext, SyncOptions, SyncScope,
    SyncedSource,
};
pub use resolve::{resolve, ResolvedFile};
pub use status::{check_all, SourceStatus, StatusEntry};
pub use writer::WriteResult;
