//! Target platform profiles and packaging
//!
//! This module handles:
//! - Platform profiles (identity, tool paths, signing table)
//! - Loading and merging profile definitions (via loader module)
//! - Artifact naming (via naming module)
//! - Extra-file signing strategies (via signing module)
//! - The packaging command pipeline (via pipeline module)
//! - Rendering static packaging inputs (via artifacts module)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PacksmithError, Result};

pub mod artifacts;
pub mod loader;
pub mod naming;
pub mod pipeline;
pub mod signing;

pub use naming::ArtifactNames;
pub use pipeline::{CommandPipeline, Stage, build_packaging_pipeline};
pub use signing::SigningTarget;

/// Operating systems with a packaging pipeline
pub const SUPPORTED_OS: &[&str] = &["osx"];

const BUILTIN_VERSIONS: &[&str] = &["11", "12", "13", "14", "15"];
const BUILTIN_ARCHITECTURES: &[&str] = &["x86_64", "arm64"];

/// Executables used by the pipeline, overridable per profile
const DEFAULT_TOOLS: &[(&str, &str)] = &[
    ("brew", "/usr/local/bin/brew"),
    ("codesign", "codesign"),
    ("hdiutil", "/usr/bin/hdiutil"),
    ("make", "/usr/bin/make"),
    ("mktemp", "mktemp -d -t 'tmp'"),
    ("patch", "/usr/bin/patch"),
    ("pkgbuild", "/usr/bin/pkgbuild"),
    ("productbuild", "/usr/bin/productbuild"),
    ("productsign", "productsign"),
    ("security", "security"),
    ("shasum", "/usr/bin/shasum"),
    ("spctl", "spctl"),
    ("tar", "tar"),
    ("xcrun", "xcrun"),
];

const DEFAULT_BUILD_USER: &str = "test";

/// A target platform, e.g. `osx-12-x86_64`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    pub identifier: String,
    pub os_name: String,
    pub os_version: String,
    pub architecture: String,
    /// Overrides for [`DEFAULT_TOOLS`], keyed by logical tool name
    pub tools: BTreeMap<String, String>,
    /// Where signable binaries live inside the build tree
    pub signing_targets: Vec<SigningTarget>,
    /// Unprivileged user that runs homebrew
    pub build_user: String,
}

/// Serialized form of a profile; everything but the identifier is optional
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDefinition {
    pub identifier: String,
    #[serde(default)]
    pub tools: BTreeMap<String, String>,
    #[serde(default)]
    pub signing_targets: Option<Vec<SigningTarget>>,
    #[serde(default)]
    pub build_user: Option<String>,
}

impl PlatformProfile {
    /// Build a profile with default tools from an `os-version-arch` identifier
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        let parts: Vec<&str> = identifier.split('-').collect();
        let [os_name, os_version, architecture] = parts.as_slice() else {
            return Err(PacksmithError::PlatformInvalid {
                platform: identifier.to_string(),
                reason: "expected <os>-<version>-<architecture>".to_string(),
            });
        };

        if !SUPPORTED_OS.contains(os_name) {
            return Err(PacksmithError::PlatformNotSupported {
                platform: identifier.to_string(),
            });
        }
        if os_version.is_empty() || architecture.is_empty() {
            return Err(PacksmithError::PlatformInvalid {
                platform: identifier.to_string(),
                reason: "version and architecture must not be empty".to_string(),
            });
        }

        Ok(Self {
            identifier: identifier.to_string(),
            os_name: os_name.to_string(),
            os_version: os_version.to_string(),
            architecture: architecture.to_string(),
            tools: BTreeMap::new(),
            signing_targets: signing::default_signing_targets(),
            build_user: DEFAULT_BUILD_USER.to_string(),
        })
    }

    /// Build a profile from its serialized definition
    pub fn from_definition(definition: ProfileDefinition) -> Result<Self> {
        let mut profile = Self::from_identifier(&definition.identifier)?;
        profile.tools = definition.tools;
        if let Some(targets) = definition.signing_targets {
            profile.signing_targets = targets;
        }
        if let Some(user) = definition.build_user {
            profile.build_user = user;
        }
        profile.validate()?;
        Ok(profile)
    }

    pub fn with_tool(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.tools.insert(name.into(), path.into());
        self
    }

    pub fn with_signing_targets(mut self, targets: Vec<SigningTarget>) -> Self {
        self.signing_targets = targets;
        self
    }

    /// Executable for a logical tool name, falling back to the default
    pub fn tool<'a>(&'a self, name: &'a str) -> &'a str {
        self.tools
            .get(name)
            .map(String::as_str)
            .or_else(|| {
                DEFAULT_TOOLS
                    .iter()
                    .find(|(tool, _)| *tool == name)
                    .map(|(_, path)| *path)
            })
            .unwrap_or(name)
    }

    /// OS name and version run together, as used in package file names
    pub fn os_identity(&self) -> String {
        format!("{}{}", self.os_name, self.os_version)
    }

    /// Check the signing table
    pub fn validate(&self) -> Result<()> {
        for target in &self.signing_targets {
            target
                .validate()
                .map_err(|reason| PacksmithError::PlatformInvalid {
                    platform: self.identifier.clone(),
                    reason,
                })?;
        }
        Ok(())
    }

    /// Commands that install build dependencies through homebrew.
    ///
    /// Homebrew refuses to run as root, so the install runs as the profile's
    /// build user.
    pub fn install_build_dependencies(&self, dependencies: &[String]) -> Vec<String> {
        if dependencies.is_empty() {
            return Vec::new();
        }

        vec![
            "mkdir -p /etc/homebrew".to_string(),
            "cd /etc/homebrew".to_string(),
            format!(
                "sudo su {} -c '{} install {}'",
                self.build_user,
                self.tool("brew"),
                dependencies.join(" ")
            ),
        ]
    }
}

/// Profiles known without any configuration
pub fn builtin_profiles() -> Vec<PlatformProfile> {
    SUPPORTED_OS
        .iter()
        .flat_map(|os| {
            BUILTIN_VERSIONS.iter().flat_map(move |version| {
                BUILTIN_ARCHITECTURES
                    .iter()
                    .map(move |arch| format!("{os}-{version}-{arch}"))
            })
        })
        .filter_map(|identifier| PlatformProfile::from_identifier(&identifier).ok())
        .collect()
}
