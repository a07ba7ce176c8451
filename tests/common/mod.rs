//! Test infrastructure for repo-sheet-sync integration tests.
#![allow(dead_code)]

use anyhow::Result;
use repo_sheet_sync::git::run_git;
use repo_sheet_sync::sheet::SheetStore;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary git repository for testing.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
    remote: Option<TempDir>,
}

fn configure_identity(path: &Path) -> Result<()> {
    run_git(path, &["config", "user.email", "test@example.com"])?;
    run_git(path, &["config", "user.name", "Test User"])?;
    Ok(())
}

impl TestRepo {
    /// Creates a new test repository with an initial commit on the master branch.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        run_git(&path, &["init", "-b", "master"])?;
        configure_identity(&path)?;

        std::fs::write(path.join("README.md"), "# Test Repo\n")?;
        run_git(&path, &["add", "README.md"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
            remote: None,
        })
    }

    /// Creates a test repository pushed to a bare `origin` remote.
    pub fn with_remote() -> Result<Self> {
        let remote_dir = TempDir::new()?;
        run_git(remote_dir.path(), &["init", "--bare", "-b", "master"])?;

        let mut local = Self::new()?;
        let remote_url = remote_dir.path().to_string_lossy().to_string();
        run_git(&local.path, &["remote", "add", "origin", &remote_url])?;
        run_git(&local.path, &["push", "-u", "origin", "master"])?;

        local.remote = Some(remote_dir);
        Ok(local)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits a file locally without pushing.
    pub fn commit_file(&self, name: &str, contents: &str) -> Result<()> {
        std::fs::write(self.path.join(name), contents)?;
        run_git(&self.path, &["add", name])?;
        run_git(&self.path, &["commit", "-m", &format!("Add {}", name)])?;
        Ok(())
    }

    /// Pushes a new commit to the remote from a separate clone, leaving this
    /// checkout behind until its next fetch.
    pub fn advance_remote(&self) -> Result<()> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("repository has no remote"))?;
        let clone_dir = TempDir::new()?;
        let clone_path = clone_dir.path().join("clone");
        let remote_url = remote.path().to_string_lossy().to_string();
        let clone_str = clone_path.to_string_lossy().to_string();
        run_git(clone_dir.path(), &["clone", &remote_url, &clone_str])?;
        configure_identity(&clone_path)?;
        std::fs::write(clone_path.join("UPSTREAM.md"), "upstream\n")?;
        run_git(&clone_path, &["add", "UPSTREAM.md"])?;
        run_git(&clone_path, &["commit", "-m", "Upstream commit"])?;
        run_git(&clone_path, &["push", "origin", "master"])?;
        Ok(())
    }

    /// Deletes the remote directory so the next fetch fails.
    pub fn remove_remote(&mut self) {
        self.remote = None;
    }

    pub fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        run_git(&self.path, &["checkout", "-b", branch])?;
        Ok(())
    }

    /// Pushes `branch` to `origin` and sets it as upstream.
    pub fn push_branch(&self, branch: &str) -> Result<()> {
        run_git(&self.path, &["push", "-u", "origin", branch])?;
        Ok(())
    }

    /// Commit id currently checked out.
    pub fn head_commit(&self) -> Result<String> {
        run_git(&self.path, &["rev-parse", "HEAD"])
    }
}

/// In-memory sheet recording every write.
pub struct MemorySheet {
    rows: Vec<Vec<String>>,
    pub writes: RefCell<Vec<(String, Vec<String>)>>,
}

impl MemorySheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            writes: RefCell::new(Vec::new()),
        }
    }
}

impl SheetStore for MemorySheet {
    fn read_rows(&self, _range: &str) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    fn write_column(&self, range: &str, values: &[String]) -> Result<()> {
        self.writes
            .borrow_mut()
            .push((range.to_string(), values.to_vec()));
        Ok(())
    }
}

/// Builds a row with four filler cells and `path` in the path column.
pub fn row_with_path(path: &str) -> Vec<String> {
    ["a", "b", "c", "d", path].iter().map(|s| s.to_string()).collect()
}
