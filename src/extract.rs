// src/extract.rs

use crate::blame::parse_porcelain;
use crate::error::Result;
use crate::git;
use crate::log::parse_last_commit;
use crate::model::{FileBatch, Identity};
use std::path::PathBuf;
use tracing::debug;

/// Produces the per-author contributions of a single file.
///
/// Implementations are shared between worker threads.
pub trait Extractor: Sync {
    fn extract(&self, file: &str) -> Result<FileBatch>;
}

/// Reads attributions from `git blame`, falling back to `git log`
/// for files without blamed lines.
#[derive(Debug, Clone)]
pub struct GitExtractor {
    pub repository: PathBuf,
    pub revision: String,
    pub identity: Identity,
}

impl GitExtractor {
    pub fn new(
        repository: impl Into<PathBuf>,
        revision: impl Into<String>,
        identity: Identity,
    ) -> Self {
        Self {
            repository: repository.into(),
            revision: revision.into(),
            identity,
        }
    }
}

impl Extractor for GitExtractor {
    fn extract(&self, file: &str) -> Result<FileBatch> {
        let blame = git::blame(file, &self.repository, &self.revision)?;
        let log = || git::log(file, &self.repository, &self.revision, self.identity);
        extract_from_output(file, &blame, log, self.identity)
    }
}

/// Turns blame output into a batch, asking `log` only when blame is empty.
pub fn extract_from_output<F>(
    file: &str,
    blame: &[String],
    log: F,
    identity: Identity,
) -> Result<FileBatch>
where
    F: FnOnce() -> Result<Vec<String>>,
{
    if blame.is_empty() {
        debug!(file, "no blamed lines, using last commit");
        let stat = parse_last_commit(&log()?).map_err(|err| err.in_file(file))?;
        return Ok(vec![stat]);
    }

    let stats = parse_porcelain(blame, identity).map_err(|err| err.in_file(file))?;
    debug!(file, authors = stats.len(), "parsed blame");
    Ok(stats.into_values().collect())
}
