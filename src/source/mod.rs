//! Component source resolution
//!
//! - `classify.rs`: decides whether a URL is a live repository or a static
//!   archive download, without network access
//! - `git_source.rs`: validates, fetches and versions a git repository

pub mod classify;
pub mod git_source;

pub use classify::{RemoteClassification, classify};
pub use git_source::{GitSource, SourceOptions, validate_remote};
