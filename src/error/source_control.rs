//! Source-control errors
//!
//! Every failure raised while validating, cloning, fetching or checking out a
//! component's repository lands in [`SourceControlError`]. URLs carried here
//! are always the redacted log form (host + path), never the configured URL.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum SourceControlError {
    #[error("\"{url}\" is not a valid Git repo")]
    #[diagnostic(
        code(packsmith::git::invalid_repo),
        help("Check that the URL is correct and the remote is reachable from this host")
    )]
    InvalidRepo { url: String },

    #[error("Invalid repository URL '{url}': {reason}")]
    #[diagnostic(code(packsmith::git::invalid_url))]
    InvalidUrl { url: String, reason: String },

    #[error("Working directory '{path}' is unusable: {reason}")]
    #[diagnostic(code(packsmith::git::workdir))]
    Workdir { path: String, reason: String },

    #[error("Unable to clone from '{url}': {reason}")]
    #[diagnostic(
        code(packsmith::git::clone_failed),
        help("Check that the URL is correct and you have access to the repository")
    )]
    CloneFailed { url: String, reason: String },

    #[error("Unable to fetch updates from '{url}': {reason}")]
    #[diagnostic(code(packsmith::git::fetch_failed))]
    FetchFailed { url: String, reason: String },

    #[error("Existing clone at '{path}' cannot be opened: {reason}")]
    #[diagnostic(
        code(packsmith::git::corrupt_clone),
        help("Remove the directory so it can be cloned again")
    )]
    CorruptClone { path: String, reason: String },

    #[error("Unable to checkout '{git_ref}' from '{url}': {reason}")]
    #[diagnostic(code(packsmith::git::checkout_failed))]
    CheckoutFailed {
        git_ref: String,
        url: String,
        reason: String,
    },
}

impl SourceControlError {
    /// Redacted identity of the repository the error refers to, if any
    pub fn repo(&self) -> Option<&str> {
        match self {
            Self::InvalidRepo { url }
            | Self::InvalidUrl { url, .. }
            | Self::CloneFailed { url, .. }
            | Self::FetchFailed { url, .. }
            | Self::CheckoutFailed { url, .. } => Some(url),
            Self::Workdir { .. } | Self::CorruptClone { .. } => None,
        }
    }

    /// The ref involved in the failure, for checkout errors
    pub fn git_ref(&self) -> Option<&str> {
        match self {
            Self::CheckoutFailed { git_ref, .. } => Some(git_ref),
            _ => None,
        }
    }
}
