//! Cloning and updating repositories
//!
//! This module handles:
//! - Fresh clones, shaped by per-component clone options
//! - Fetching updates (branches and all tags) into an existing clone

use std::collections::BTreeMap;
use std::path::Path;

use git2::{AutotagOption, FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};
use tracing::warn;

use super::auth::setup_auth_callbacks;

/// Options applied to a fresh clone.
///
/// Built from the free-form string mapping carried by a component's source
/// configuration. Recognised keys: `depth`, `branch`, `bare`,
/// `recurse-submodules`. Anything else is logged and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    pub depth: Option<i32>,
    pub branch: Option<String>,
    pub bare: bool,
    pub recurse_submodules: bool,
}

impl CloneOptions {
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut options = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "depth" => match value.parse::<i32>() {
                    Ok(depth) if depth > 0 => options.depth = Some(depth),
                    _ => warn!(value = %value, "ignoring invalid clone depth"),
                },
                "branch" => options.branch = Some(value.clone()),
                "bare" => options.bare = is_truthy(value),
                "recurse-submodules" | "recursive" => options.recurse_submodules = is_truthy(value),
                other => warn!(option = %other, "ignoring unsupported clone option"),
            }
        }

        options
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "on"
    )
}

fn fetch_options<'a>() -> FetchOptions<'a> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    fetch_options
}

fn is_local_url(url: &str) -> bool {
    url.starts_with("file://") || Path::new(url).is_absolute()
}

/// Clone `url` into `target` honoring `options`
pub fn clone(url: &str, target: &Path, options: &CloneOptions) -> Result<Repository, git2::Error> {
    let mut fetch = fetch_options();
    // Shallow clones are not supported by libgit2 for local transports
    if let Some(depth) = options.depth {
        if !is_local_url(url) {
            fetch.depth(depth);
        }
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch);
    builder.bare(options.bare);
    if let Some(branch) = &options.branch {
        builder.branch(branch);
    }

    let repo = builder.clone(url, target)?;

    if options.recurse_submodules && !options.bare {
        for mut submodule in repo.submodules()? {
            submodule.update(true, None)?;
        }
    }

    Ok(repo)
}

/// Fetch branches and every tag from `origin` into an open repository
pub fn fetch_updates(repo: &Repository) -> Result<(), git2::Error> {
    let mut remote = repo.find_remote("origin")?;
    let mut fetch = fetch_options();
    fetch.download_tags(AutotagOption::All);

    // Empty refspecs: use the remote's configured fetch refspecs
    remote.fetch(&[] as &[&str], Some(&mut fetch), None)
}
