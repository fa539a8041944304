//! Platforms command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::PlatformsArgs;
use crate::error::Result;
use crate::platform::PlatformProfile;
use crate::platform::loader::PlatformLoader;

use super::workspace_path;

/// List known platform profiles
pub fn run(workspace: Option<PathBuf>, args: PlatformsArgs) -> Result<()> {
    let workspace = workspace_path(workspace)?;
    let profiles = PlatformLoader::new(&workspace).load()?;

    for profile in &profiles {
        if args.detailed {
            display_profile_detailed(profile);
        } else {
            println!("{}", profile.identifier);
        }
    }

    Ok(())
}

fn display_profile_detailed(profile: &PlatformProfile) {
    let name = Style::new().cyan().bold();
    let label = Style::new().dim();

    println!("{}", name.apply_to(&profile.identifier));
    println!("  {} {}", label.apply_to("build user:"), profile.build_user);
    for (tool, path) in &profile.tools {
        println!("  {} {tool} = {path}", label.apply_to("tool:"));
    }
    for target in &profile.signing_targets {
        println!(
            "  {} {} => {}",
            label.apply_to("sign:"),
            target.path,
            target.glob
        );
    }
}
