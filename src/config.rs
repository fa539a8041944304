//! Build configuration passed into pipeline construction
//!
//! The signing toggles are process-wide settings of the build host. They are
//! read once at the CLI boundary (see `cli::PackageArgs`) and handed to the
//! pipeline builder explicitly, never looked up from the environment inside it.

use std::path::{Path, PathBuf};

/// Enables every code-signing and notarization stage when set
pub const FORCE_SIGNING_ENV: &str = "PACKSMITH_FORCE_SIGNING";

/// Skips notarization even when signing is forced
pub const NO_NOTARIZE_ENV: &str = "PACKSMITH_NO_NOTARIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub force_signing: bool,
    pub skip_notarization: bool,
    /// Directory the generated commands run from; optional resource
    /// directories are looked up beneath it
    pub resources_root: PathBuf,
}

impl BuildConfig {
    pub fn new(resources_root: impl Into<PathBuf>) -> Self {
        Self {
            force_signing: false,
            skip_notarization: false,
            resources_root: resources_root.into(),
        }
    }

    pub fn with_force_signing(mut self, force: bool) -> Self {
        self.force_signing = force;
        self
    }

    pub fn with_skip_notarization(mut self, skip: bool) -> Self {
        self.skip_notarization = skip;
        self
    }

    /// Whether `relative` exists as a directory under the resources root
    pub fn has_resource_dir(&self, relative: impl AsRef<Path>) -> bool {
        self.resources_root.join(relative).is_dir()
    }

    pub fn notarize(&self) -> bool {
        self.force_signing && !self.skip_notarization
    }
}
