//! Git command wrappers.
//!
//! This module provides a thin wrapper around git CLI commands,
//! handling command execution and error formatting. Every command runs with
//! the repository as the child's working directory; the process's own
//! working directory is never touched.

use crate::constants::REMOTE_NAME;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use std::process::{Command, Stdio};

/// Callback invoked before each git command with the repository and arguments.
pub type GitLogger = fn(&Path, &[&str]);

pub fn no_op_logger(_repo: &Path, _args: &[&str]) {}

pub fn verbose_logger(repo: &Path, args: &[&str]) {
    eprintln!(
        "  {} {}",
        format!("$ git {}", args.join(" ")).dimmed(),
        format!("({})", repo.display()).dimmed()
    );
}

fn git_command(repo: &Path, args: &[&str]) -> Command {
    let mut command = Command::new("git");
    command.current_dir(repo).args(args).stdin(Stdio::null());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        command.creation_flags(crate::constants::CREATE_NO_WINDOW);
    }

    command
}

pub fn run_git(repo: &Path, args: &[&str]) -> anyhow::Result<String> {
    log::trace!("git {} in {}", args.join(" "), repo.display());
    let output = git_command(repo, args)
        .output()
        .context("Failed to spawn git command")?;

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout);
        Ok(result.as_ref().trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim())
    }
}

fn run_logged(repo: &Path, args: &[&str], logger: GitLogger) -> anyhow::Result<String> {
    logger(repo, args);
    run_git(repo, args)
}

fn validate_branch_name(branch: &str) -> anyhow::Result<()> {
    if branch.is_empty() || branch.starts_with('-') || branch.contains(['\0', '\n']) {
        anyhow::bail!("Invalid branch name: {:?}", branch);
    }
    Ok(())
}

/// Updates remote-tracking refs. Output is discarded; nothing is merged.
pub fn fetch(repo: &Path, logger: GitLogger) -> anyhow::Result<()> {
    let args = ["fetch"];
    logger(repo, &args);
    let status = git_command(repo, &args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("Failed to spawn git command")?;

    if !status.success() {
        anyhow::bail!("git fetch failed ({})", status);
    }
    Ok(())
}

pub fn get_current_branch(repo: &Path, logger: GitLogger) -> anyhow::Result<String> {
    run_logged(repo, &["rev-parse", "--abbrev-ref", "HEAD"], logger)
        .context("Failed to get current branch")
}

/// Resolves the commit at the tip of a local branch.
pub fn local_commit(repo: &Path, branch: &str, logger: GitLogger) -> anyhow::Result<String> {
    validate_branch_name(branch)?;
    run_logged(repo, &["rev-parse", branch], logger)
        .with_context(|| format!("Failed to resolve branch '{}'", branch))
}

/// Resolves the remote-tracking commit `origin/<branch>`.
pub fn remote_commit(repo: &Path, branch: &str, logger: GitLogger) -> anyhow::Result<String> {
    validate_branch_name(branch)?;
    let remote_ref = format!("{}/{}", REMOTE_NAME, branch);
    run_logged(repo, &["rev-parse", &remote_ref], logger)
        .with_context(|| format!("Failed to resolve remote branch '{}'", remote_ref))
}
