//! Common test utilities for packsmith integration tests

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write the acme project metadata used across tests
    #[allow(dead_code)]
    pub fn write_project(&self, extra: &str) -> PathBuf {
        self.write_file(
            "project.yaml",
            &format!(
                "name: acme\nversion: 1.2.3\nrelease: \"1\"\nidentifier: com.example\n{extra}"
            ),
        );
        self.path.join("project.yaml")
    }
}

/// Run a git command in `dir`, panicking on failure
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create an upstream repository on `main` with one commit tagged `tag`
#[allow(dead_code)]
pub fn create_upstream_repo(workspace: &TestWorkspace, name: &str, tag: &str) -> PathBuf {
    let repo = workspace.path.join("upstream").join(name);
    std::fs::create_dir_all(&repo).expect("Failed to create upstream directory");

    git(&repo, &["init", "--initial-branch", "main"]);
    git(&repo, &["config", "user.email", "test@example.com"]);
    git(&repo, &["config", "user.name", "Test User"]);
    git(&repo, &["config", "commit.gpgsign", "false"]);
    git(&repo, &["config", "tag.gpgsign", "false"]);
    std::fs::write(repo.join("README"), format!("{name}\n")).expect("Failed to write README");
    git(&repo, &["add", "README"]);
    git(&repo, &["commit", "-m", "Initial commit"]);
    git(&repo, &["tag", tag]);

    repo
}
