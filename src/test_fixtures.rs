//! Test fixtures for source-resolution tests.
//!
//! Upstream repositories are built with the `git` CLI so the code under test
//! (libgit2) only ever sees them as a remote.
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, create_upstream_repo};
//!
//! let upstream = create_upstream_repo(&["v1.0.0"]);
//! let workdir = create_temp_dir();
//! ```

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Create an empty temp directory.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Run a git command in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// Write `file` with `content` and commit it.
pub fn commit_file(dir: &Path, file: &str, content: &str) {
    std::fs::write(dir.join(file), content).expect("Failed to write file");
    git(dir, &["add", file]);
    git(dir, &["commit", "-m", &format!("Update {file}")]);
}

/// An upstream repository with one commit and the given tags on it.
pub struct UpstreamRepo {
    _temp: TempDir,
    pub path: PathBuf,
}

impl UpstreamRepo {
    /// file:// URL for cloning
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Create an upstream repository on branch `main` with the given tags.
///
/// # Panics
///
/// Panics if git is unavailable or any step fails.
#[must_use]
pub fn create_upstream_repo(tags: &[&str]) -> UpstreamRepo {
    let temp = create_temp_dir();
    let path = temp.path().join("tool");
    std::fs::create_dir_all(&path).expect("Failed to create repo dir");

    git(&path, &["init", "--initial-branch", "main"]);
    git(&path, &["config", "user.email", "test@example.com"]);
    git(&path, &["config", "user.name", "Test User"]);
    git(&path, &["config", "commit.gpgsign", "false"]);
    git(&path, &["config", "tag.gpgsign", "false"]);
    commit_file(&path, "README", "tool\n");

    for tag in tags {
        git(&path, &["tag", tag]);
    }

    UpstreamRepo { _temp: temp, path }
}
