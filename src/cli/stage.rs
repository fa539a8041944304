use clap::Parser;
use std::path::PathBuf;

/// Arguments for the stage command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  packsmith stage -p project.yaml --platform osx-12-x86_64 --templates templates --workdir build")]
pub struct StageArgs {
    /// Project metadata file (YAML)
    #[arg(long, short = 'p', value_name = "FILE")]
    pub project: PathBuf,

    /// Target platform identifier, e.g. osx-12-x86_64
    #[arg(long, value_name = "PLATFORM")]
    pub platform: String,

    /// Directory holding <os>/project-installer.xml, preinstall, postinstall and uninstaller.tool
    #[arg(long, value_name = "DIR")]
    pub templates: PathBuf,

    /// Directory the packaging inputs are written to
    #[arg(long, value_name = "DIR")]
    pub workdir: PathBuf,
}
