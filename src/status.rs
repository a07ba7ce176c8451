// Repository status check: directory/repository detection, fetch, HEAD comparison

use crate::constants::GIT_DIR;
use crate::git::{self, GitLogger};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoStatus {
    NotADirectory,
    NotARepository,
    UpToDate,
    OutOfDate,
    VcsError,
}

impl RepoStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RepoStatus::NotADirectory => "❌ Not a directory",
            RepoStatus::NotARepository => "❌ Not a Git repository",
            RepoStatus::UpToDate => "✅ Up to date",
            RepoStatus::OutOfDate => "🔄 Not up to date",
            RepoStatus::VcsError => "⚠️ Git error",
        }
    }
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn is_git_repo(path: &Path) -> bool {
    path.join(GIT_DIR).is_dir()
}

/// Reports how the checkout at `path` relates to its remote.
///
/// Never fails: every git problem (spawn failure, network error, missing
/// `origin/<branch>`, detached HEAD that cannot be resolved) becomes
/// [`RepoStatus::VcsError`].
pub fn check_status(path: &Path, logger: GitLogger) -> RepoStatus {
    if !path.is_dir() {
        return RepoStatus::NotADirectory;
    }

    if !is_git_repo(path) {
        return RepoStatus::NotARepository;
    }

    match compare_with_remote(path, logger) {
        Ok(true) => RepoStatus::UpToDate,
        Ok(false) => RepoStatus::OutOfDate,
        Err(e) => {
            log::debug!("{}: {:#}", path.display(), e);
            RepoStatus::VcsError
        }
    }
}

fn compare_with_remote(path: &Path, logger: GitLogger) -> anyhow::Result<bool> {
    git::fetch(path, logger)?;
    let branch = git::get_current_branch(path, logger)?;
    let local = git::local_commit(path, &branch, logger)?;
    let remote = git::remote_commit(path, &branch, logger)?;
    Ok(local == remote)
}
