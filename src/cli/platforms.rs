use clap::Parser;

/// Arguments for the platforms command
#[derive(Parser, Debug)]
pub struct PlatformsArgs {
    /// Show tool overrides and the signing table of each profile
    #[arg(long, short = 'd')]
    pub detailed: bool,
}
