//! Package command implementation
//!
//! Prints the packaging pipeline for a project on one platform, one command
//! per line, ready to be dropped into a build recipe.

use std::path::PathBuf;

use console::Style;
use tracing::info;

use crate::cli::PackageArgs;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::platform::loader::PlatformLoader;
use crate::platform::signing::signer_for;
use crate::platform::{ArtifactNames, CommandPipeline, build_packaging_pipeline};
use crate::project::ProjectMetadata;

use super::workspace_path;

/// Run package command
pub fn run(workspace: Option<PathBuf>, args: PackageArgs) -> Result<()> {
    let workspace = workspace_path(workspace)?;
    let project = ProjectMetadata::load(&args.project)?;
    let profile = PlatformLoader::new(&workspace).find(&args.platform)?;

    let config = BuildConfig::new(&workspace)
        .with_force_signing(args.force_signing)
        .with_skip_notarization(args.no_notarize);

    let signer = signer_for(&project, &profile);
    let pipeline = build_packaging_pipeline(
        &profile,
        &project,
        &config,
        signer.as_deref(),
        args.repo.as_deref(),
    )?;

    let names = ArtifactNames::new(&project, &profile);
    info!(
        "Packaging {} for {} ({} commands, signing {})",
        names.package_file_name(),
        profile.identifier,
        pipeline.len(),
        if config.force_signing { "on" } else { "off" }
    );

    for command in profile.install_build_dependencies(&args.build_dependencies) {
        println!("{command}");
    }

    if args.stages {
        print_stages(&pipeline);
    } else {
        print!("{pipeline}");
    }

    Ok(())
}

fn print_stages(pipeline: &CommandPipeline) {
    let header = Style::new().green().bold();
    for (stage, commands) in pipeline.stages() {
        println!("# {}", header.apply_to(stage));
        for command in commands {
            println!("{command}");
        }
    }
}
