// src/blame.rs

use crate::error::{FameError, Result};
use crate::model::{CommitterStat, Identity};
use std::collections::HashMap;

const ORIGIN: &str = "git blame";
const PREFIX_FILENAME: &str = "filename ";

/// Header opening a group of lines blamed on the same commit:
/// `<hash> <orig-line> <final-line> <lines-in-group>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupHeader<'a> {
    commit: &'a str,
    size: usize,
}

impl<'a> GroupHeader<'a> {
    fn parse(line: &'a str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [commit, orig_line, final_line, size] = fields[..] else {
            let message = format!(
                "expected 4 fields in group header, got {}: {line:?}",
                fields.len()
            );
            return Err(FameError::format(ORIGIN, message));
        };

        if commit.is_empty() || !commit.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FameError::format(ORIGIN, format!("bad commit hash {commit:?}")));
        }
        for number in [orig_line, final_line] {
            number.parse::<usize>().map_err(|err| {
                FameError::format(ORIGIN, format!("bad line number {number:?}: {err}"))
            })?;
        }
        let size = size.parse::<usize>().map_err(|err| {
            FameError::format(ORIGIN, format!("bad group size {size:?}: {err}"))
        })?;
        if size == 0 {
            return Err(FameError::format(ORIGIN, "empty group"));
        }

        Ok(Self { commit, size })
    }

    /// Lines to step over from the header to the next group when the
    /// metadata block is omitted: the header itself, then one content line
    /// per blamed line and one short header per line after the first.
    fn backreference_span(&self) -> usize {
        2 * self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<'a> {
    Header,
    Metadata(GroupHeader<'a>),
}

/// Parses `git blame --porcelain` output into per-author contributions.
///
/// Empty output gives an empty map, the caller falls back to `git log`.
pub fn parse_porcelain(
    lines: &[String],
    identity: Identity,
) -> Result<HashMap<String, CommitterStat>> {
    let prefix = identity.blame_prefix();

    let mut stats: HashMap<String, CommitterStat> = HashMap::new();
    // Commits already described in this file, only the first group carries metadata
    let mut known: HashMap<&str, String> = HashMap::new();
    let mut state = State::Header;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].as_str();

        match state {
            State::Header => {
                let header = GroupHeader::parse(line)?;

                match known.get(header.commit) {
                    Some(name) => {
                        stats
                            .entry(name.clone())
                            .or_insert_with(|| CommitterStat::new(name.as_str()))
                            .lines += header.size;
                        i += header.backreference_span();
                    }
                    None => {
                        state = State::Metadata(header);
                        i += 1;
                    }
                }
            }
            State::Metadata(header) => {
                if line.starts_with(PREFIX_FILENAME) {
                    let name = known.get(header.commit).ok_or_else(|| {
                        FameError::format(
                            ORIGIN,
                            format!("commit {} has no {}line", header.commit, prefix),
                        )
                    })?;
                    stats
                        .entry(name.clone())
                        .or_insert_with(|| CommitterStat::new(name.as_str()))
                        .lines += header.size;

                    // The filename line closes the block, then come the
                    // remaining 2N - 1 lines of the group
                    state = State::Header;
                    i += 2 * header.size;
                    continue;
                }

                if let Some(name) = line.strip_prefix(prefix) {
                    stats
                        .entry(name.to_string())
                        .or_insert_with(|| CommitterStat::new(name))
                        .commits
                        .push(header.commit.to_string());
                    known.insert(header.commit, name.to_string());
                }
                i += 1;
            }
        }
    }

    if let State::Metadata(header) = state {
        return Err(FameError::format(
            ORIGIN,
            format!("output ended inside metadata of commit {}", header.commit),
        ));
    }

    Ok(stats)
}
