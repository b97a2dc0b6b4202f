// src/error.rs

use std::io;
use thiserror::Error;

/// Everything that can abort a run
#[derive(Debug, Error)]
pub enum FameError {
    /// A git subprocess could not be started or exited non-zero
    #[error("{command} {file}: {message}")]
    Command {
        command: &'static str,
        file: String,
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Git printed something that does not have the expected shape
    #[error("invalid {origin} format{}: {message}", file_suffix(.file))]
    Format {
        origin: &'static str,
        file: Option<String>,
        message: String,
    },

    /// Splitting command output into lines failed
    #[error("split lines: {0}")]
    Read(#[source] io::Error),

    #[error("language table: {0}")]
    LanguageTable(#[source] serde_json::Error),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|file| format!(" in {file}"))
        .unwrap_or_default()
}

impl FameError {
    pub fn format(origin: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            origin,
            file: None,
            message: message.into(),
        }
    }

    /// Attach the file being processed to a format error
    pub fn in_file(self, path: &str) -> Self {
        match self {
            Self::Format {
                origin,
                file: None,
                message,
            } => Self::Format {
                origin,
                file: Some(path.to_string()),
                message,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, FameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_mentions_file() {
        let err = FameError::format("git blame", "expected 4 fields, got 3").in_file("src/a.go");
        assert_eq!(
            err.to_string(),
            "invalid git blame format in src/a.go: expected 4 fields, got 3"
        );
    }

    #[test]
    fn test_format_error_without_file() {
        let err = FameError::format("git log", "file has no history");
        assert_eq!(err.to_string(), "invalid git log format: file has no history");
    }

    #[test]
    fn test_in_file_keeps_other_errors() {
        let err = FameError::Read(io::Error::other("boom")).in_file("a.go");
        assert!(matches!(err, FameError::Read(_)));
    }
}
