//! Bounded fetch scheduler.
//!
//! Runs independent tasks on a dedicated pool of at most `limit` workers.
//! The first failure observed is returned; once a failure is recorded no new
//! tasks start, and tasks already running finish on their own. No retries.

use rayon::prelude::*;

use crate::error::SyncError;

/// Worker ceiling used when the caller does not choose one.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Run `task` over every item with at most `limit` tasks in flight.
///
/// `limit` is clamped to at least one worker and at most one per item.
/// Completion order is unspecified; tasks must target disjoint resources.
pub fn run_bounded<T, F>(items: &[T], limit: usize, task: F) -> Result<(), SyncError>
where
    T: Sync,
    F: Fn(&T) -> Result<(), SyncError> + Sync,
{
    if items.is_empty() {
        return Ok(());
    }
    let workers = limit.max(1).min(items.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("docsee-fetch-{i}"))
        .build()?;
    pool.install(|| items.par_iter().try_for_each(&task))
}
