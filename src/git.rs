// src/git.rs

use crate::error::{FameError, Result};
use crate::model::Identity;
use git2::{ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use std::io::{BufRead, Cursor};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Lists every blob reachable from the tree of `revision`, in tree order.
pub fn file_list(repository: &Path, revision: &str) -> Result<Vec<String>> {
    let repo = Repository::open(repository)?;
    let tree = repo.revparse_single(revision)?.peel_to_tree()?;

    let mut files = Vec::new();
    tree.walk(TreeWalkMode::PreOrder, |root, entry| {
        // Submodules show up as commits and cannot be blamed
        if entry.kind() == Some(ObjectType::Blob) {
            if let Some(name) = entry.name() {
                files.push(format!("{root}{name}"));
            }
        }
        TreeWalkResult::Ok
    })?;

    debug!(count = files.len(), %revision, "listed files");
    Ok(files)
}

/// `git blame --porcelain` of one file, split into lines
pub fn blame(file: &str, repository: &Path, revision: &str) -> Result<Vec<String>> {
    let output = run_git(
        "git blame",
        file,
        repository,
        &["blame", "--porcelain", revision, "--", file],
    )?;
    split_lines(&output)
}

/// Most recent commit touching `file`, formatted as `<hash> <name>`
pub fn log(
    file: &str,
    repository: &Path,
    revision: &str,
    identity: Identity,
) -> Result<Vec<String>> {
    let output = run_git(
        "git log",
        file,
        repository,
        &["log", identity.log_format(), "-1", revision, "--", file],
    )?;
    split_lines(&output)
}

fn run_git(
    command: &'static str,
    file: &str,
    repository: &Path,
    args: &[&str],
) -> Result<Vec<u8>> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repository)
        .output()
        .map_err(|source| FameError::Command {
            command,
            file: file.to_string(),
            message: "failed to run git".to_string(),
            source: Some(source),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FameError::Command {
            command,
            file: file.to_string(),
            message: format!("{} ({})", stderr.trim(), output.status),
            source: None,
        });
    }

    Ok(output.stdout)
}

/// Splits raw command output into lines without their terminators.
///
/// Output that is not valid UTF-8 is decoded lossily, blamed files may
/// contain arbitrary bytes.
pub fn split_lines(output: &[u8]) -> Result<Vec<String>> {
    let text = String::from_utf8_lossy(output);
    Cursor::new(text.as_bytes())
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(FameError::Read)
}
