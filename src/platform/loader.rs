//! Platform profile loading and merging
//!
//! Profiles come from the built-in table and may be overridden or extended by
//! `platforms.json` files. Each file holds either a bare array of profile
//! definitions or an object with a `platforms` array.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{PlatformProfile, ProfileDefinition, builtin_profiles};
use crate::error::{PacksmithError, Result};

const PLATFORMS_FILE: &str = "platforms.json";

/// Platform profile loader
pub struct PlatformLoader {
    workspace_root: PathBuf,
    /// Directory holding the user-wide `platforms.json`
    global_dir: Option<PathBuf>,
}

impl PlatformLoader {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            global_dir: dirs::config_dir().map(|dir| dir.join("packsmith")),
        }
    }

    /// Use `dir` instead of the user config directory for global overrides
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Load profiles from every source.
    ///
    /// Priority order (later sources override earlier ones):
    /// 1. Built-in profiles
    /// 2. Workspace platforms.json (if exists)
    /// 3. Global platforms.json from ~/.config/packsmith/ (if exists)
    pub fn load(&self) -> Result<Vec<PlatformProfile>> {
        let mut profiles = builtin_profiles();

        if let Some(workspace) = Self::load_file(&self.workspace_root.join(PLATFORMS_FILE))? {
            profiles = Self::merge_profiles(profiles, workspace);
        }

        if let Some(dir) = &self.global_dir {
            if let Some(global) = Self::load_file(&dir.join(PLATFORMS_FILE))? {
                profiles = Self::merge_profiles(profiles, global);
            }
        }

        Ok(profiles)
    }

    /// Look up one profile by identifier
    pub fn find(&self, identifier: &str) -> Result<PlatformProfile> {
        self.load()?
            .into_iter()
            .find(|profile| profile.identifier == identifier)
            .ok_or_else(|| PacksmithError::PlatformNotSupported {
                platform: identifier.to_string(),
            })
    }

    fn load_file(path: &Path) -> Result<Option<Vec<PlatformProfile>>> {
        if !path.exists() {
            return Ok(None);
        }

        debug!("Loading platform overrides from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| PacksmithError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let definitions = Self::parse_platforms_json(&content, &path.display().to_string())?;
        definitions
            .into_iter()
            .map(PlatformProfile::from_definition)
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Later profiles replace earlier ones with the same identifier; new
    /// identifiers are appended.
    fn merge_profiles(
        base: Vec<PlatformProfile>,
        overrides: Vec<PlatformProfile>,
    ) -> Vec<PlatformProfile> {
        let mut merged = base;

        for profile in overrides {
            if let Some(pos) = merged
                .iter()
                .position(|p| p.identifier == profile.identifier)
            {
                merged[pos] = profile;
            } else {
                merged.push(profile);
            }
        }

        merged
    }

    /// Parse platforms JSON, supporting both array format and object with "platforms" key
    fn parse_platforms_json(content: &str, path: &str) -> Result<Vec<ProfileDefinition>> {
        let parse_failed = |reason: String| PacksmithError::ConfigParseFailed {
            path: path.to_string(),
            reason,
        };

        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| parse_failed(e.to_string()))?;

        let platforms = match value {
            serde_json::Value::Array(_) => value,
            serde_json::Value::Object(mut obj) => match obj.remove("platforms") {
                Some(platforms @ serde_json::Value::Array(_)) => platforms,
                Some(_) => {
                    return Err(parse_failed(
                        "platforms field must be an array".to_string(),
                    ));
                }
                None => {
                    return Err(parse_failed(
                        "Expected array of platforms or object with 'platforms' key".to_string(),
                    ));
                }
            },
            _ => {
                return Err(parse_failed(
                    "Expected array of platforms or object with 'platforms' key".to_string(),
                ));
            }
        };

        serde_json::from_value(platforms).map_err(|e| parse_failed(e.to_string()))
    }
}
