//! Validate command implementation

use std::time::Duration;

use crate::cli::ValidateArgs;
use crate::error::{Result, SourceControlError};
use crate::git::LibGit2Backend;
use crate::git::url;
use crate::source::validate_remote;

/// Print `valid`, or print `invalid` and fail with an invalid-repository error
pub fn run(args: ValidateArgs) -> Result<()> {
    let backend = LibGit2Backend::new();

    if validate_remote(&backend, &args.url, Duration::from_secs(args.timeout)) {
        println!("valid");
        Ok(())
    } else {
        println!("invalid");
        let log_url = url::parse(&args.url)
            .map(|parsed| url::log_url(&parsed))
            .unwrap_or_else(|_| url::redact_unparsed(&args.url));
        Err(SourceControlError::InvalidRepo { url: log_url }.into())
    }
}
