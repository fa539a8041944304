//! Packsmith - package build command generator
//!
//! Resolves component sources from git remotes and generates the ordered
//! shell commands that turn a built project into a platform installer.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod git;
mod platform;
mod project;
mod source;
mod telemetry;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    telemetry::init_tracing(cli.log_json, telemetry::level_for(cli.verbose, cli.quiet));

    let result = match cli.command {
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Package(args) => commands::package::run(cli.workspace, args),
        Commands::Stage(args) => commands::stage::run(cli.workspace, args),
        Commands::Platforms(args) => commands::platforms::run(cli.workspace, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
