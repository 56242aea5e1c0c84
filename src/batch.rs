//! Worker-pool batch processing.
//!
//! Each input's pipeline touches no state shared with any other input, so a
//! batch is embarrassingly parallel: workers pull jobs from a shared cursor
//! and run them to completion. One file's failure is logged and counted, and
//! the batch keeps going: a bad input must never abort the rest of the job.
//!
//! Workers each build their own worker state via the injected factory.
//! Detector and transcriber instances are frequently `!Send` (model handles,
//! FFI contexts), so nothing here requires moving them across threads.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{error, info};

use crate::error::Result;

/// One unit of batch work: an input file and its output destination.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Outcome tallies for a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Process every job on a pool of `parallelism` workers.
///
/// `make_worker` runs once per worker thread and returns the closure that
/// processes a single job. The job list is injected rather than discovered
/// here; directory traversal belongs to the caller.
pub fn process_all<W, F>(jobs: &[Job], parallelism: NonZeroUsize, make_worker: F) -> BatchSummary
where
    F: Fn() -> W + Sync,
    W: FnMut(&Job) -> Result<()>,
{
    let next = AtomicUsize::new(0);
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let workers = parallelism.get().min(jobs.len().max(1));

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                let mut work = make_worker();
                loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(job) = jobs.get(i) else { break };

                    match work(job) {
                        Ok(()) => {
                            succeeded.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(err) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                            error!(
                                input = %job.input.display(),
                                %err,
                                "job failed; continuing batch"
                            );
                        }
                    }
                }
            });
        }
    });

    let summary = BatchSummary {
        succeeded: succeeded.into_inner(),
        failed: failed.into_inner(),
    };
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch complete"
    );
    summary
}

/// Default worker count: one per available CPU.
pub fn default_parallelism() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}
