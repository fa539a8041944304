//! Stage command implementation

use std::fs;
use std::path::PathBuf;

use crate::cli::StageArgs;
use crate::error::Result;
use crate::platform::artifacts::{DirectoryRenderer, stage_packaging_artifacts};
use crate::platform::loader::PlatformLoader;
use crate::project::ProjectMetadata;

use super::workspace_path;

/// Render installer inputs for a project into the working directory
pub fn run(workspace: Option<PathBuf>, args: StageArgs) -> Result<()> {
    let workspace = workspace_path(workspace)?;
    let project = ProjectMetadata::load(&args.project)?;
    let profile = PlatformLoader::new(&workspace).find(&args.platform)?;

    fs::create_dir_all(&args.workdir)?;
    let renderer = DirectoryRenderer::new(&args.templates);
    stage_packaging_artifacts(&args.workdir, &project, &profile, &renderer, &workspace)?;

    println!("Staged packaging inputs in {}", args.workdir.display());
    Ok(())
}
