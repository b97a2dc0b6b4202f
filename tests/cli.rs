use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process;
use tempfile::TempDir;

fn git(repo: &Path, args: &[&str], author: &str, committer: &str) {
    let output = process::Command::new("git")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(repo)
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", format!("{}@example.com", author.to_lowercase()))
        .env("GIT_COMMITTER_NAME", committer)
        .env(
            "GIT_COMMITTER_EMAIL",
            format!("{}@example.com", committer.to_lowercase()),
        )
        .output()
        .expect("git must be installed");
    assert!(output.status.success(), "git {args:?}: {output:?}");
}

/// Two commits:
/// - Alice (committed by Carol) adds `a.go` (3 lines) and `b.go` (2 lines)
/// - Bob (committed by Carol) appends a line to `b.go` and adds an empty file
fn sample_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = dir.path();

    git(repo, &["init", "-q"], "Alice", "Carol");

    fs::write(repo.join("a.go"), "package a\n\nfunc A() {}\n").unwrap();
    fs::write(repo.join("b.go"), "package b\n\n").unwrap();
    git(repo, &["add", "."], "Alice", "Carol");
    git(repo, &["commit", "-q", "-m", "initial"], "Alice", "Carol");

    fs::write(repo.join("b.go"), "package b\n\nfunc B() {}\n").unwrap();
    fs::create_dir(repo.join("docs")).unwrap();
    fs::write(repo.join("docs/empty.txt"), "").unwrap();
    git(repo, &["add", "."], "Bob", "Carol");
    git(repo, &["commit", "-q", "-m", "more"], "Bob", "Carol");

    dir
}

fn git_fame(repo: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("git-fame").unwrap();
    cmd.arg("--repository").arg(repo.path());
    cmd
}

#[test]
fn test_json_by_author() {
    let repo = sample_repo();

    git_fame(&repo)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(concat!(
            r#"[{"name":"Alice","lines":5,"commits":1,"files":2},"#,
            r#"{"name":"Bob","lines":1,"commits":1,"files":2}]"#,
            "\n"
        ));
}

#[test]
fn test_json_lines_by_committer() {
    let repo = sample_repo();

    git_fame(&repo)
        .args(["--use-committer", "--format", "json-lines"])
        .assert()
        .success()
        .stdout("{\"name\":\"Carol\",\"lines\":6,\"commits\":2,\"files\":3}\n");
}

#[test]
fn test_extensions_filter() {
    let repo = sample_repo();

    git_fame(&repo)
        .args(["--extensions", ".go", "--format", "csv", "--order-by", "files"])
        .assert()
        .success()
        .stdout("Name,Lines,Commits,Files\nAlice,5,1,2\nBob,1,1,1\n");
}

#[test]
fn test_restrict_to_empty_file() {
    let repo = sample_repo();

    git_fame(&repo)
        .args(["--restrict-to", "docs/*", "--format", "json"])
        .assert()
        .success()
        .stdout("[{\"name\":\"Bob\",\"lines\":0,\"commits\":1,\"files\":1}]\n");
}

#[test]
fn test_older_revision() {
    let repo = sample_repo();

    git_fame(&repo)
        .args(["--revision", "HEAD~1", "--format", "json-lines", "-j", "1"])
        .assert()
        .success()
        .stdout("{\"name\":\"Alice\",\"lines\":5,\"commits\":1,\"files\":2}\n");
}

#[test]
fn test_tabular_is_default() {
    let repo = sample_repo();

    git_fame(&repo)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Name  Lines Commits Files\n"))
        .stdout(predicate::str::contains("Alice 5     1       2\n"));
}

#[test]
fn test_unknown_revision_fails() {
    let repo = sample_repo();

    git_fame(&repo)
        .args(["--revision", "no-such-branch"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("get file list"));
}

#[test]
fn test_invalid_glob_fails() {
    let repo = sample_repo();

    git_fame(&repo)
        .args(["--exclude", "[oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("select by globs"));
}
