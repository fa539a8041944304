use clap::Parser;
use clap::builder::FalseyValueParser;
use std::path::PathBuf;

use crate::config::{FORCE_SIGNING_ENV, NO_NOTARIZE_ENV};

/// Arguments for the package command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Unsigned pipeline:\n    packsmith package -p project.yaml --platform osx-12-x86_64\n\n\
                  Signed and notarized:\n    PACKSMITH_FORCE_SIGNING=1 packsmith package -p project.yaml --platform osx-14-arm64\n\n\
                  Signed, published under a repo directory:\n    packsmith package -p project.yaml --platform osx-14-arm64 --force-signing --no-notarize --repo stable")]
pub struct PackageArgs {
    /// Project metadata file (YAML)
    #[arg(long, short = 'p', value_name = "FILE")]
    pub project: PathBuf,

    /// Target platform identifier, e.g. osx-12-x86_64
    #[arg(long, value_name = "PLATFORM")]
    pub platform: String,

    /// Repository directory inserted into the output path
    #[arg(long)]
    pub repo: Option<String>,

    /// Sign binaries, installer and disk image
    #[arg(long, env = FORCE_SIGNING_ENV, value_parser = FalseyValueParser::new())]
    pub force_signing: bool,

    /// Skip notarization of the signed disk image
    #[arg(long, env = NO_NOTARIZE_ENV, value_parser = FalseyValueParser::new())]
    pub no_notarize: bool,

    /// Homebrew build dependency to install before packaging (repeatable)
    #[arg(long = "build-dependency", value_name = "FORMULA")]
    pub build_dependencies: Vec<String>,

    /// Show the stage each command belongs to
    #[arg(long)]
    pub stages: bool,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_package() {
        let cli = Cli::try_parse_from([
            "packsmith",
            "package",
            "-p",
            "project.yaml",
            "--platform",
            "osx-12-x86_64",
            "--force-signing",
            "--build-dependency",
            "cmake",
        ])
        .unwrap();
        match cli.command {
            Commands::Package(args) => {
                assert_eq!(args.project.to_str(), Some("project.yaml"));
                assert_eq!(args.platform, "osx-12-x86_64");
                assert!(args.force_signing);
                assert!(!args.no_notarize);
                assert_eq!(args.build_dependencies, vec!["cmake".to_string()]);
                assert!(args.repo.is_none());
            }
            _ => panic!("Expected Package command"),
        }
    }

    #[test]
    fn test_cli_parsing_package_requires_platform() {
        assert!(Cli::try_parse_from(["packsmith", "package", "-p", "project.yaml"]).is_err());
    }
}
