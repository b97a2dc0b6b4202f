// src/analyzer.rs

use crate::aggregate::Aggregator;
use crate::error::{FameError, Result};
use crate::extract::Extractor;
use crate::model::{AuthorStat, FileBatch};
use crossbeam::channel;
use indicatif::ProgressBar;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::thread;
use tracing::{info, warn};

/// Capacity of the queue between extraction workers and the aggregator
const CHANNEL_SIZE: usize = 100;

/// Computes author statistics for `files`.
///
/// Every file is extracted on a rayon pool of `jobs` threads (0 picks one per
/// CPU) while the calling thread merges finished batches. The first error
/// received aborts the run; the remaining workers still run to completion
/// and their results are dropped.
pub fn analyze<E: Extractor>(
    files: &[String],
    extractor: &E,
    jobs: usize,
    bar: &ProgressBar,
) -> Result<Vec<AuthorStat>> {
    let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let (tx, rx) = channel::bounded::<Result<FileBatch>>(CHANNEL_SIZE);

    info!(
        files = files.len(),
        threads = pool.current_num_threads(),
        "analyzing files"
    );

    let outcome = thread::scope(|scope| {
        // 1. Fan out: one task per file, each sends exactly one message
        scope.spawn(move || {
            pool.install(|| {
                files.par_iter().for_each_with(tx, |tx, file| {
                    // Only fails once the aggregator is gone
                    let _ = tx.send(extractor.extract(file));
                });
            });
        });

        // 2. Fan in: drain one message per file
        let mut aggregator = Aggregator::new();
        let mut first_error: Option<FameError> = None;

        for _ in files {
            let Ok(message) = rx.recv() else {
                break;
            };

            match message {
                Ok(batch) if first_error.is_none() => {
                    aggregator.merge(batch);
                    bar.inc(1);
                }
                Ok(_) => {}
                Err(err) if first_error.is_none() => first_error = Some(err),
                Err(err) => warn!(error = %err, "dropping error after the first failure"),
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(aggregator),
        }
    });

    // 3. Only now can commit counts be resolved
    let stats = outcome?.finish();
    bar.finish();
    info!(authors = stats.len(), "analysis complete");
    Ok(stats)
}
