//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - classify: Classify command arguments
//! - validate: Validate command arguments
//! - fetch: Fetch command arguments
//! - package: Package command arguments
//! - stage: Stage command arguments
//! - platforms: Platforms command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod classify;
pub mod completions;
pub mod fetch;
pub mod package;
pub mod platforms;
pub mod stage;
pub mod validate;

pub use classify::ClassifyArgs;
pub use completions::CompletionsArgs;
pub use fetch::FetchArgs;
pub use package::PackageArgs;
pub use platforms::PlatformsArgs;
pub use stage::StageArgs;
pub use validate::ValidateArgs;

/// Packsmith - package build command generator
///
/// Resolve git sources to versions and generate the command pipelines that
/// turn a built project into a platform installer.
#[derive(Parser, Debug)]
#[command(
    name = "packsmith",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Generate package build commands from git sources and platform profiles",
    long_about = "Packsmith validates and fetches git sources, derives their versions, and \
                  emits the ordered shell commands that package a built project for a target \
                  platform, including code signing and notarization.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  packsmith classify https://github.com/acme/tool            \x1b[90m# live-repository\x1b[0m\n   \
                  packsmith fetch https://github.com/acme/tool --ref v1.2.3  \x1b[90m# Clone and print version\x1b[0m\n   \
                  packsmith package -p project.yaml --platform osx-12-x86_64 \x1b[90m# Print packaging pipeline\x1b[0m\n   \
                  packsmith platforms                                        \x1b[90m# List platform profiles\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace directory holding platforms.json and resources/ (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "PACKSMITH_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a remote URL as a live repository or a static archive
    Classify(ClassifyArgs),

    /// Check whether a URL points at a reachable git repository
    Validate(ValidateArgs),

    /// Clone or update a git source and print its version
    Fetch(FetchArgs),

    /// Print the packaging pipeline for a project on a platform
    Package(PackageArgs),

    /// Render installer scripts and resources into a working directory
    Stage(StageArgs),

    /// List known platform profiles
    Platforms(PlatformsArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_classify() {
        let cli = Cli::try_parse_from(["packsmith", "classify", "https://github.com/acme/tool"])
            .unwrap();
        match cli.command {
            Commands::Classify(args) => assert_eq!(args.url, "https://github.com/acme/tool"),
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["packsmith", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "packsmith",
            "-v",
            "--log-json",
            "-w",
            "/tmp/workspace",
            "platforms",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.log_json);
        assert!(!cli.quiet);
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/workspace")));
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["packsmith", "platforms", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["packsmith", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, "bash"),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["packsmith"]).is_err());
    }
}
