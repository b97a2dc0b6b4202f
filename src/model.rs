// src/model.rs

use serde::Serialize;

/// Width of a full commit hash as printed by git
pub const HASH_SIZE: usize = 40;

/// Full hex commit hash
pub type CommitId = String;

/// Aggregated statistics of one author across the whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorStat {
    pub name: String,
    pub lines: usize,
    /// Number of distinct commits, only final once every file is merged
    pub commits: usize,
    pub files: usize,
}

/// What one author contributed to a single file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitterStat {
    pub name: String,
    pub lines: usize,
    /// Commits seen for this author in the file, in order of appearance
    pub commits: Vec<CommitId>,
}

impl CommitterStat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// All contributions found in one file, at most one entry per author
pub type FileBatch = Vec<CommitterStat>;

/// Which git identity owns a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Author,
    Committer,
}

impl Identity {
    pub fn from_use_committer(use_committer: bool) -> Self {
        if use_committer {
            Identity::Committer
        } else {
            Identity::Author
        }
    }

    /// Prefix of the metadata line carrying the name in `git blame --porcelain`
    pub fn blame_prefix(self) -> &'static str {
        match self {
            Identity::Author => "author ",
            Identity::Committer => "committer ",
        }
    }

    /// `git log` format printing `<hash> <name>` for this identity
    pub fn log_format(self) -> &'static str {
        match self {
            Identity::Author => "--format=format:%H %an",
            Identity::Committer => "--format=format:%H %cn",
        }
    }
}
