//! Project metadata consumed by the packaging pipeline
//!
//! Supplied by the component/project model of the build driver, usually as a
//! YAML document:
//!
//! ```yaml
//! name: acme
//! version: 1.2.3
//! release: "1"
//! identifier: com.example
//! extra_files_to_sign:
//!   - usr/local/bin/acme-helper
//! use_local_signing: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PacksmithError, Result, malformed};

/// Host used by the remote signing strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningHost {
    pub hostname: String,
    #[serde(default = "default_signing_user")]
    pub username: String,
    /// Command run on the host against each uploaded file
    pub command: String,
}

fn default_signing_user() -> String {
    "signer".to_string()
}

fn default_release() -> String {
    "1".to_string()
}

/// Read-only description of the project being packaged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub version: String,
    #[serde(default = "default_release")]
    pub release: String,
    /// Reverse-DNS prefix, e.g. `com.example`
    pub identifier: String,
    /// Paths relative to the staged root, signed before packaging
    #[serde(default)]
    pub extra_files_to_sign: Vec<String>,
    #[serde(default)]
    pub use_local_signing: bool,
    /// Set when an external step already delivered the bill-of-materials
    #[serde(default)]
    pub bill_of_materials_present: bool,
    /// Repository name folded into the output directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_host: Option<SigningHost>,
}

impl ProjectMetadata {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            release: release.into(),
            identifier: identifier.into(),
            extra_files_to_sign: Vec::new(),
            use_local_signing: false,
            bill_of_materials_present: false,
            repo: None,
            signing_host: None,
        }
    }

    pub fn with_extra_file_to_sign(mut self, path: impl Into<String>) -> Self {
        self.extra_files_to_sign.push(path.into());
        self
    }

    pub fn with_local_signing(mut self, local: bool) -> Self {
        self.use_local_signing = local;
        self
    }

    pub fn with_bill_of_materials(mut self, present: bool) -> Self {
        self.bill_of_materials_present = present;
        self
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_signing_host(mut self, host: SigningHost) -> Self {
        self.signing_host = Some(host);
        self
    }

    /// Load and validate project metadata from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PacksmithError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| PacksmithError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let project: Self =
            serde_yaml::from_str(&content).map_err(|e| PacksmithError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        project.validate()?;
        Ok(project)
    }

    /// Check the fields every pipeline command interpolates
    pub fn validate(&self) -> Result<()> {
        require_token("name", &self.name)?;
        if self.name.contains('/') {
            return Err(malformed("name", "must not contain '/'"));
        }
        require_token("version", &self.version)?;
        require_token("release", &self.release)?;
        require_token("identifier", &self.identifier)?;

        if let Some(repo) = &self.repo {
            require_token("repo", repo)?;
        }

        for file in &self.extra_files_to_sign {
            require_token("extra_files_to_sign", file)?;
        }

        Ok(())
    }
}

fn require_token(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(malformed(field, "must not be empty"));
    }
    if value.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        return Err(malformed(
            field,
            format!("'{value}' must not contain whitespace or quotes"),
        ));
    }
    Ok(())
}
