// src/log.rs

use crate::error::{FameError, Result};
use crate::model::{CommitterStat, HASH_SIZE};

const ORIGIN: &str = "git log";

/// Attributes a file without blamed lines to the author of its last commit.
///
/// Expects the output of `git log --format=format:"%H %an"`, newest first.
pub fn parse_last_commit(lines: &[String]) -> Result<CommitterStat> {
    let line = lines
        .first()
        .ok_or_else(|| FameError::format(ORIGIN, "file has no history"))?;

    if line.len() < HASH_SIZE + 1 {
        return Err(FameError::format(ORIGIN, format!("line too short: {line:?}")));
    }

    let (hash, rest) = line
        .split_at_checked(HASH_SIZE)
        .ok_or_else(|| FameError::format(ORIGIN, format!("bad commit hash in {line:?}")))?;
    let name = rest
        .strip_prefix(' ')
        .ok_or_else(|| FameError::format(ORIGIN, format!("missing separator in {line:?}")))?;

    Ok(CommitterStat {
        name: name.to_string(),
        lines: 0,
        commits: vec![hash.to_string()],
    })
}
