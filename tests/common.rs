//! Shared test utilities for integration tests.
//!
//! Builds throwaway git repositories with the `git` CLI inside temporary
//! directories and runs the generator against them.

#![allow(dead_code)]

use anyhow::Result;
use gitshelf::Config;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Creates temporary git repository whose HEAD points at `main`.
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    git(path, &["init", "--quiet"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    git(path, &["config", "tag.gpgsign", "false"])?;

    Ok(dir)
}

/// Runs a git command in the repository and returns its trimmed stdout.
///
/// # Errors
///
/// Returns error if git cannot be spawned or exits unsuccessfully
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    git_with_env(repo_path, args, &[])
}

fn git_with_env(repo_path: &Path, args: &[&str], env: &[(&str, String)]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .envs(env.iter().map(|(k, v)| (*k, v.as_str())))
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Stages everything and commits, returning the commit hash.
///
/// # Errors
///
/// Returns error if staging or committing fails
pub fn git_commit(repo_path: &Path, message: &str) -> Result<String> {
    git(repo_path, &["add", "--all"])?;
    git(repo_path, &["commit", "--quiet", "-m", message])?;
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Stages everything and commits with fixed author and committer time.
///
/// # Errors
///
/// Returns error if staging or committing fails
pub fn git_commit_at(repo_path: &Path, message: &str, unix_seconds: i64) -> Result<String> {
    let date = format!("@{} +0000", unix_seconds);
    git(repo_path, &["add", "--all"])?;
    git_with_env(
        repo_path,
        &["commit", "--quiet", "-m", message],
        &[
            ("GIT_AUTHOR_DATE", date.clone()),
            ("GIT_COMMITTER_DATE", date),
        ],
    )?;
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Writes file to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(repo_path: &Path, path: &str, content: impl AsRef<[u8]>) -> Result<()> {
    let file_path = repo_path.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Generator configuration for a repository and output directory.
pub fn config(repo: &Path, output: &Path) -> Config {
    Config {
        repo: repo.to_path_buf(),
        output: output.to_path_buf(),
        name: Some("test-repo".to_string()),
        owner: None,
        branch: None,
        theme: "InspiredGitHub".to_string(),
        commit_limit: 100,
        jobs: 2,
        verbose: false,
        quiet: true,
    }
}

/// Reads a generated file as UTF8.
///
/// # Errors
///
/// Returns error if the file is missing
pub fn read_output(output: &Path, relative: &str) -> Result<String> {
    let path: PathBuf = output.join(relative);
    std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
