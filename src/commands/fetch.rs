//! Fetch command implementation
//!
//! Clones (or updates) a git source, checks out the requested ref and prints
//! the version derived from its nearest tag.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use crate::cli::FetchArgs;
use crate::error::{PacksmithError, Result};
use crate::source::{GitSource, SourceOptions};

use super::workspace_path;

/// Run fetch command
pub fn run(args: FetchArgs) -> Result<()> {
    let workdir = workspace_path(args.workdir)?;

    let mut options = SourceOptions::default()
        .with_ref(args.git_ref)
        .with_probe_timeout(Duration::from_secs(args.timeout));
    if let Some(dirname) = args.dirname {
        options = options.with_dirname(dirname);
    }
    for (key, value) in args.clone_options {
        options = options.with_clone_option(key, value);
    }

    let spinner = create_progress_spinner(&format!("Resolving {}", args.url));
    let result = GitSource::new(&args.url, &workdir, options).and_then(|mut source| {
        let version = source.fetch()?;
        Ok((source, version))
    });
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let (source, version) = result.inspect_err(report_failure)?;
    source.verify();
    debug!("Workdir: {}", source.workdir().display());
    debug!("Cleanup: {}", source.cleanup_command());
    println!("{}", version.as_deref().unwrap_or("(no version)"));

    Ok(())
}

fn report_failure(err: &PacksmithError) {
    let Some(scm) = err.source_control() else {
        return;
    };
    error!(
        repo = scm.repo().unwrap_or("-"),
        git_ref = scm.git_ref().unwrap_or("-"),
        "fetch failed"
    );
}

fn create_progress_spinner(message: &str) -> Option<ProgressBar> {
    if !console::Term::stderr().is_term() {
        return None;
    }
    let style = ProgressStyle::default_spinner()
        .template(&format!("{{spinner}} {message}..."))
        .ok()?
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}
