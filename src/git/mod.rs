//! Git backend for source resolution
//!
//! This module handles:
//! - Probing whether a URL answers like a git remote (bounded in time)
//! - Cloning repositories and fetching updates into existing clones
//! - Checking out refs and describing versions from tags
//!
//! Authentication is delegated entirely to git's native system:
//! - SSH keys from ~/.ssh/ and the SSH agent
//! - Git credential helpers
//!
//! [`GitBackend`] is the seam between the source model and libgit2; the
//! source model only ever sees `git2::Error`s from it and translates them.

use std::path::Path;
use std::time::Duration;

pub mod auth;
pub mod checkout;
pub mod clone;
pub mod error;
pub mod probe;
pub mod refs;
pub mod url;

pub use clone::CloneOptions;
pub use error::{interpret_git_error, is_missing_repository};
pub use probe::CommandProbe;

/// Version-control operations needed to resolve a component's source
pub trait GitBackend {
    /// Bounded-time check that `url` answers like a git remote
    fn probe_remote(&self, url: &str, timeout: Duration) -> bool;

    /// Open the clone at `dest` and fetch remote updates into it
    fn fetch_existing(&self, dest: &Path) -> Result<(), git2::Error>;

    /// Clone `url` into `dest`
    fn clone_fresh(&self, url: &str, dest: &Path, options: &CloneOptions)
    -> Result<(), git2::Error>;

    /// Switch the clone at `dest` to `git_ref`
    fn checkout(&self, dest: &Path, git_ref: &str) -> Result<(), git2::Error>;

    /// Describe `git_ref` in the clone at `dest` by its nearest tag
    fn describe(&self, dest: &Path, git_ref: &str) -> Result<String, git2::Error>;
}

/// libgit2-backed implementation, probing remotes with the git CLI
#[derive(Debug, Clone, Default)]
pub struct LibGit2Backend {
    probe: CommandProbe,
}

impl LibGit2Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different command to probe remotes
    pub fn with_probe(probe: CommandProbe) -> Self {
        Self { probe }
    }
}

impl GitBackend for LibGit2Backend {
    fn probe_remote(&self, url: &str, timeout: Duration) -> bool {
        self.probe.run(url, timeout)
    }

    fn fetch_existing(&self, dest: &Path) -> Result<(), git2::Error> {
        let repo = checkout::open(dest)?;
        clone::fetch_updates(&repo)
    }

    fn clone_fresh(
        &self,
        url: &str,
        dest: &Path,
        options: &CloneOptions,
    ) -> Result<(), git2::Error> {
        clone::clone(url, dest, options).map(|_| ())
    }

    fn checkout(&self, dest: &Path, git_ref: &str) -> Result<(), git2::Error> {
        let repo = checkout::open(dest)?;
        checkout::checkout(&repo, git_ref)
    }

    fn describe(&self, dest: &Path, git_ref: &str) -> Result<String, git2::Error> {
        let repo = checkout::open(dest)?;
        checkout::describe(&repo, git_ref)
    }
}
