//! Checkout and describe operations on a local clone

use std::path::Path;

use git2::{DescribeFormatOptions, DescribeOptions, Repository, build::CheckoutBuilder};

use super::refs;

/// Open an existing clone
pub fn open(path: &Path) -> Result<Repository, git2::Error> {
    Repository::open(path)
}

/// Point HEAD at `git_ref` (detached) and force the working tree to match
pub fn checkout(repo: &Repository, git_ref: &str) -> Result<(), git2::Error> {
    let commit = refs::resolve(repo, git_ref)?;

    repo.set_head_detached(commit.id())?;

    if !repo.is_bare() {
        let mut builder = CheckoutBuilder::new();
        builder.force();
        repo.checkout_head(Some(&mut builder))?;
    }

    Ok(())
}

/// Nearest reachable tag from `git_ref`, `git describe --tags` style
pub fn describe(repo: &Repository, git_ref: &str) -> Result<String, git2::Error> {
    let commit = refs::resolve(repo, git_ref)?;

    let mut options = DescribeOptions::new();
    options.describe_tags();

    let description = commit.as_object().describe(&options)?;
    description.format(Some(&DescribeFormatOptions::new()))
}
