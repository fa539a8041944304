//! Code-signing data and strategies
//!
//! Two kinds of signing feed the pipeline:
//! - the platform's signing table: every binary matching a `(path, glob)`
//!   entry inside the build tree is signed and verified
//! - a project's explicit extra files, signed by an [`ExtraFilesSigner`]
//!   running either on the build host or on a remote signing host
//!
//! Commands reference keychain details through make-escaped shell variables
//! (`$$SIGNING_KEYCHAIN` and friends) that the build host provides.

use serde::{Deserialize, Serialize};

use super::PlatformProfile;
use crate::project::{ProjectMetadata, SigningHost};

/// A directory inside the build tree and the file-name glob of signable files.
///
/// `path` is relative to the platform build directory and may contain the
/// placeholders `{root}` (staged root, `<name>-<version>`) and `{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningTarget {
    pub path: String,
    pub glob: String,
}

impl SigningTarget {
    pub fn new(path: impl Into<String>, glob: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            glob: glob.into(),
        }
    }

    /// Path and glob with placeholders filled in for `project`
    pub fn expand(&self, project: &ProjectMetadata) -> (String, String) {
        let root = format!("{}-{}", project.name, project.version);
        let fill = |s: &str| s.replace("{root}", &root).replace("{name}", &project.name);
        (fill(&self.path), fill(&self.glob))
    }

    /// Reject entries that would break the generated `find` invocation
    pub fn validate(&self) -> Result<(), String> {
        if self.path.is_empty() || self.glob.is_empty() {
            return Err("signing target path and glob must not be empty".to_string());
        }
        if self.path.contains(['\'', '"', ' ']) || self.glob.contains(['\'', '"', ' ', '/']) {
            return Err(format!(
                "signing target '{}' => '{}' contains characters that cannot be quoted",
                self.path, self.glob
            ));
        }
        let sample = self.glob.replace("{root}", "root").replace("{name}", "name");
        wax::Glob::new(&sample)
            .map(|_| ())
            .map_err(|e| format!("invalid glob '{}': {e}", self.glob))
    }
}

/// Default signing table for macOS packages
pub fn default_signing_targets() -> Vec<SigningTarget> {
    vec![
        SigningTarget::new("root/{root}/usr/local/bin/", "*"),
        SigningTarget::new("root/{root}/usr/local/libexec/", "*"),
        SigningTarget::new("root/{root}/usr/local/lib/", "*.dylib"),
        SigningTarget::new("root/{root}/usr/local/lib", "*.bundle"),
        SigningTarget::new("plugins", "{name}-installer-plugin"),
    ]
}

/// Unlocks the signing keychain; every signing sub-sequence starts with it
pub fn unlock_keychain(profile: &PlatformProfile) -> String {
    format!(
        "{} unlock-keychain -p $$SIGNING_KEYCHAIN_PW $$SIGNING_KEYCHAIN",
        profile.tool("security")
    )
}

/// Signs a project's explicitly listed extra files
pub trait ExtraFilesSigner {
    /// Commands signing every extra file of `project` in place.
    ///
    /// `tempdir_token` creates a scratch directory on whichever host does the
    /// signing; `staged_root` is the staged root relative to `$(tempdir)`.
    fn commands(
        &self,
        project: &ProjectMetadata,
        tempdir_token: &str,
        staged_root: &str,
    ) -> Vec<String>;

    /// Whether the commands sign with the build host's keychain
    fn uses_keychain(&self) -> bool {
        false
    }
}

/// Signs on the build host with the application signing identity
#[derive(Debug, Clone)]
pub struct LocalSigner {
    codesign: String,
}

impl LocalSigner {
    pub fn new(profile: &PlatformProfile) -> Self {
        Self {
            codesign: profile.tool("codesign").to_string(),
        }
    }
}

impl ExtraFilesSigner for LocalSigner {
    fn commands(
        &self,
        project: &ProjectMetadata,
        _tempdir_token: &str,
        staged_root: &str,
    ) -> Vec<String> {
        project
            .extra_files_to_sign
            .iter()
            .map(|file| {
                format!(
                    "{} --timestamp --options runtime --keychain $$SIGNING_KEYCHAIN -vfs \"$$APPLICATION_SIGNING_CERT\" $(tempdir){}/{}",
                    self.codesign,
                    staged_root,
                    file.trim_start_matches('/')
                )
            })
            .collect()
    }

    fn uses_keychain(&self) -> bool {
        true
    }
}

/// Ships each file to a signing host, signs it there, and copies it back
#[derive(Debug, Clone)]
pub struct RemoteSigner {
    host: SigningHost,
}

impl RemoteSigner {
    pub fn new(host: SigningHost) -> Self {
        Self { host }
    }

    fn target(&self) -> String {
        format!("{}@{}", self.host.username, self.host.hostname)
    }
}

impl ExtraFilesSigner for RemoteSigner {
    fn commands(
        &self,
        project: &ProjectMetadata,
        tempdir_token: &str,
        staged_root: &str,
    ) -> Vec<String> {
        let target = self.target();

        project
            .extra_files_to_sign
            .iter()
            .map(|file| {
                let local = format!("$(tempdir){}/{}", staged_root, file.trim_start_matches('/'));
                format!(
                    "tmp=$$(ssh {target} \"{tempdir_token}\") && \
                     rsync -e ssh --verbose --recursive --relative {local} {target}:$$tmp && \
                     ssh {target} \"{command} $$tmp{local}\" && \
                     rsync -e ssh --verbose {target}:$$tmp{local} {local}",
                    command = self.host.command,
                )
            })
            .collect()
    }
}

/// Strategy selected by the project's `use_local_signing` flag.
///
/// Returns `None` for remote signing without a configured host; the pipeline
/// only rejects that when it has extra files to sign.
pub fn signer_for(
    project: &ProjectMetadata,
    profile: &PlatformProfile,
) -> Option<Box<dyn ExtraFilesSigner>> {
    if project.use_local_signing {
        return Some(Box::new(LocalSigner::new(profile)));
    }
    project
        .signing_host
        .clone()
        .map(|host| Box::new(RemoteSigner::new(host)) as Box<dyn ExtraFilesSigner>)
}
