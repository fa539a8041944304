//! Git source handling
//!
//! A [`GitSource`] is constructed once per component. Construction validates
//! the remote before anything is cloned; `fetch` then clones or updates the
//! working copy under `workdir/<dirname>` and checks out the configured ref.
//! The version is derived from the nearest tag and cached for the lifetime of
//! the source.
//!
//! Errors and log lines only ever carry the redacted URL (host + path).

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use url::Url;

use super::classify;
use crate::error::{PacksmithError, Result, SourceControlError, malformed};
use crate::git::{self, CloneOptions, GitBackend, LibGit2Backend};

/// Time allowed for the remote probe during construction
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

/// Ref checked out when none is configured
pub const DEFAULT_REF: &str = "HEAD";

/// Decide whether `url` is a usable git remote.
///
/// GitHub URLs are judged by shape alone so that builds do not hammer the
/// GitHub API; everything else gets a probe bounded by `timeout`. Probe
/// failures of any kind are `false`.
pub fn validate_remote<B: GitBackend + ?Sized>(backend: &B, url: &str, timeout: Duration) -> bool {
    if classify::is_github_url(url) {
        return classify::is_live_github_remote(url);
    }
    backend.probe_remote(url, timeout)
}

/// Optional settings for a git source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    pub git_ref: Option<String>,
    pub dirname: Option<String>,
    pub clone_options: BTreeMap<String, String>,
    pub probe_timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            git_ref: None,
            dirname: None,
            clone_options: BTreeMap::new(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl SourceOptions {
    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    pub fn with_dirname(mut self, dirname: impl Into<String>) -> Self {
        self.dirname = Some(dirname.into());
        self
    }

    pub fn with_clone_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.clone_options.insert(key.into(), value.into());
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

/// A component's upstream git repository
#[derive(Debug)]
pub struct GitSource<B: GitBackend = LibGit2Backend> {
    url: Url,
    log_url: String,
    git_ref: String,
    workdir: PathBuf,
    dirname: String,
    clone_options: CloneOptions,
    version: OnceCell<Option<String>>,
    backend: B,
}

impl GitSource<LibGit2Backend> {
    /// Create a source backed by libgit2, validating the remote first
    pub fn new(url: &str, workdir: impl AsRef<Path>, options: SourceOptions) -> Result<Self> {
        Self::with_backend(LibGit2Backend::new(), url, workdir, options)
    }
}

impl<B: GitBackend> GitSource<B> {
    /// Create a source with an explicit backend, validating the remote first
    pub fn with_backend(
        backend: B,
        url: &str,
        workdir: impl AsRef<Path>,
        options: SourceOptions,
    ) -> Result<Self> {
        let git_ref = options.git_ref.unwrap_or_else(|| DEFAULT_REF.to_string());
        if git_ref.trim().is_empty() {
            return Err(malformed("ref", "must not be empty"));
        }

        let workdir = resolve_workdir(workdir.as_ref())?;

        let url = git::url::parse(url).map_err(|e| SourceControlError::InvalidUrl {
            url: git::url::redact_unparsed(url),
            reason: e.to_string(),
        })?;
        let log_url = git::url::log_url(&url);

        let dirname = match options.dirname {
            Some(dirname) => dirname,
            None => git::url::basename(&url),
        };
        if dirname.is_empty() || dirname == "." || dirname == ".." || dirname.contains('/') {
            return Err(malformed(
                "dirname",
                format!("cannot use '{dirname}' as the source directory for '{log_url}'"),
            ));
        }

        if !validate_remote(&backend, url.as_str(), options.probe_timeout) {
            return Err(SourceControlError::InvalidRepo { url: log_url }.into());
        }

        Ok(Self {
            url,
            log_url,
            git_ref,
            workdir,
            dirname,
            clone_options: CloneOptions::from_map(&options.clone_options),
            version: OnceCell::new(),
            backend,
        })
    }

    /// Host + path of the remote, safe for logs and error messages
    pub fn log_url(&self) -> &str {
        &self.log_url
    }

    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    /// Fully resolved working directory
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Directory name of the clone inside `workdir`
    pub fn dirname(&self) -> &str {
        &self.dirname
    }

    pub fn clone_path(&self) -> PathBuf {
        self.workdir.join(&self.dirname)
    }

    /// Clone or update the working copy, check out the ref, and return the
    /// derived version (absent when the repository has no reachable tag).
    ///
    /// The working tree may move, so any cached version is dropped first.
    pub fn fetch(&mut self) -> Result<Option<String>> {
        self.invalidate_version();
        let dest = self.clone_path();

        if has_existing_clone(&dest) {
            info!("Fetching updates for '{}' from '{}'", self.dirname, self.log_url);
            self.backend.fetch_existing(&dest).map_err(|e| {
                if git::is_missing_repository(&e) {
                    SourceControlError::CorruptClone {
                        path: dest.display().to_string(),
                        reason: git::interpret_git_error(&e),
                    }
                } else {
                    SourceControlError::FetchFailed {
                        url: self.log_url.clone(),
                        reason: git::interpret_git_error(&e),
                    }
                }
            })?;
        } else {
            self.clone_fresh(&dest)?;
        }

        let git_ref = self.git_ref.clone();
        self.checkout(&git_ref)?;

        Ok(self.version().map(str::to_string))
    }

    fn clone_fresh(&self, dest: &Path) -> Result<()> {
        info!("Cloning Git repo '{}'", self.log_url);
        self.backend
            .clone_fresh(self.url.as_str(), dest, &self.clone_options)
            .map_err(|e| SourceControlError::CloneFailed {
                url: self.log_url.clone(),
                reason: git::interpret_git_error(&e),
            })?;
        info!("Successfully cloned '{}'", self.dirname);
        Ok(())
    }

    /// Switch the working copy to `git_ref`.
    ///
    /// Moving to a different ref drops any cached version.
    pub fn checkout(&mut self, git_ref: &str) -> Result<()> {
        if git_ref.trim().is_empty() {
            return Err(malformed("ref", "must not be empty"));
        }

        info!("Checking out '{}' from Git repo '{}'", git_ref, self.dirname);
        self.backend
            .checkout(&self.clone_path(), git_ref)
            .map_err(|e| SourceControlError::CheckoutFailed {
                git_ref: git_ref.to_string(),
                url: self.log_url.clone(),
                reason: git::interpret_git_error(&e),
            })?;

        if self.git_ref != git_ref {
            self.git_ref = git_ref.to_string();
            self.invalidate_version();
        }
        Ok(())
    }

    /// Version described from the nearest tag, computed at most once.
    ///
    /// Before the first clone exists there is nothing to describe; that case
    /// returns `None` without caching so a later fetch can still version.
    pub fn version(&self) -> Option<&str> {
        if let Some(cached) = self.version.get() {
            return cached.as_deref();
        }
        if !has_existing_clone(&self.clone_path()) {
            return None;
        }
        self.version.get_or_init(|| self.describe()).as_deref()
    }

    /// Forget the cached version so the next read describes again
    pub fn invalidate_version(&mut self) {
        self.version = OnceCell::new();
    }

    fn describe(&self) -> Option<String> {
        match self.backend.describe(&self.clone_path(), &self.git_ref) {
            Ok(version) => Some(version),
            Err(_) => {
                info!(
                    "Directory '{}' cannot be versioned by Git. Maybe it hasn't been tagged yet?",
                    self.dirname
                );
                None
            }
        }
    }

    /// Shell fragment that removes the source directory
    pub fn cleanup_command(&self) -> String {
        format!("rm -rf {}", self.dirname)
    }

    /// Git sources carry no checksum; this only reports what is in use
    pub fn verify(&self) {
        info!(
            "Nothing to verify for '{}' (using Git reference '{}')",
            self.dirname, self.git_ref
        );
    }
}

fn resolve_workdir(workdir: &Path) -> Result<PathBuf> {
    let resolved = dunce::canonicalize(workdir).map_err(|e| SourceControlError::Workdir {
        path: workdir.display().to_string(),
        reason: e.to_string(),
    })?;
    if !resolved.is_dir() {
        return Err(PacksmithError::from(SourceControlError::Workdir {
            path: resolved.display().to_string(),
            reason: "not a directory".to_string(),
        }));
    }
    Ok(resolved)
}

fn has_existing_clone(dest: &Path) -> bool {
    dest.read_dir()
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
