// src/aggregate.rs

use crate::model::{AuthorStat, CommitId, FileBatch};
use std::collections::{HashMap, HashSet};

/// Folds per-file batches into per-author totals.
///
/// Merging is commutative, so the order in which files finish does not
/// matter. Commit counts are resolved in [`Aggregator::finish`].
#[derive(Debug, Default)]
pub struct Aggregator {
    stats: HashMap<String, AuthorStat>,
    commits: HashMap<String, HashSet<CommitId>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, batch: FileBatch) {
        for cstat in batch {
            let stat = self
                .stats
                .entry(cstat.name.clone())
                .or_insert_with(|| AuthorStat {
                    name: cstat.name.clone(),
                    ..AuthorStat::default()
                });
            stat.lines += cstat.lines;
            stat.files += 1;

            self.commits
                .entry(cstat.name)
                .or_default()
                .extend(cstat.commits);
        }
    }

    pub fn finish(self) -> Vec<AuthorStat> {
        let Self { mut stats, commits } = self;
        for (name, seen) in commits {
            if let Some(stat) = stats.get_mut(&name) {
                stat.commits = seen.len();
            }
        }
        stats.into_values().collect()
    }
}
