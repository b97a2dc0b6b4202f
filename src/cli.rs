// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "git-fame",
    author,
    version,
    about = "Per-author line, commit and file counts of a git repository"
)]
pub struct Args {
    /// Path to the git repository
    #[arg(long, default_value = ".")]
    pub repository: PathBuf,

    /// Revision to compute statistics for
    #[arg(long, default_value = "HEAD")]
    pub revision: String,

    /// Attribute lines to the committer instead of the author
    #[arg(long)]
    pub use_committer: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Tabular)]
    pub format: Format,

    /// Key to sort the results by
    #[arg(long, value_enum, default_value_t = Order::Lines)]
    pub order_by: Order,

    /// Only count files with these extensions, e.g. `.go,.md`
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Only count files of these languages, e.g. `go,markdown`
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Skip files matching any of these glob patterns
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Skip files not matching at least one of these glob patterns
    #[arg(long, value_delimiter = ',')]
    pub restrict_to: Vec<String>,

    /// Number of files processed in parallel (0 = one per CPU)
    #[arg(short, long, env = "GIT_FAME_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum Format {
    /// Aligned columns
    Tabular,
    /// Comma separated values with a header row
    Csv,
    /// A single JSON array
    Json,
    /// One JSON object per line
    JsonLines,
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum Order {
    Lines,
    Commits,
    Files,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["git-fame"]).unwrap();

        assert_eq!(args.repository, PathBuf::from("."));
        assert_eq!(args.revision, "HEAD");
        assert!(!args.use_committer);
        assert_eq!(args.format, Format::Tabular);
        assert_eq!(args.order_by, Order::Lines);
        assert!(args.extensions.is_empty());
        assert!(args.restrict_to.is_empty());
        assert!(!args.verbose);
    }

    #[test]
    fn test_lists_and_enums() {
        let args = Args::try_parse_from([
            "git-fame",
            "--repository",
            "/tmp/repo",
            "--revision",
            "v1.0",
            "--use-committer",
            "--format",
            "json-lines",
            "--order-by",
            "commits",
            "--extensions",
            ".go,.md",
            "--exclude",
            "vendor/*",
            "--exclude",
            "*.pb.go",
            "--languages",
            "go",
            "-j",
            "4",
        ])
        .unwrap();

        assert_eq!(args.repository, PathBuf::from("/tmp/repo"));
        assert_eq!(args.revision, "v1.0");
        assert!(args.use_committer);
        assert_eq!(args.format, Format::JsonLines);
        assert_eq!(args.order_by, Order::Commits);
        assert_eq!(args.extensions, vec![".go", ".md"]);
        assert_eq!(args.exclude, vec!["vendor/*", "*.pb.go"]);
        assert_eq!(args.languages, vec!["go"]);
        assert_eq!(args.jobs, 4);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from(["git-fame", "--format", "xml"]).is_err());
        assert!(Args::try_parse_from(["git-fame", "--order-by", "name"]).is_err());
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Args::try_parse_from(["git-fame", "extra"]).is_err());
    }
}
