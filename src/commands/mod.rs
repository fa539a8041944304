//! Command implementations for the packsmith CLI

use std::path::PathBuf;

use crate::error::{PacksmithError, Result};

pub mod classify;
pub mod completions;
pub mod fetch;
pub mod package;
pub mod platforms;
pub mod stage;
pub mod validate;
pub mod version;

/// Get workspace path from CLI argument or current directory
fn workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| PacksmithError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}
