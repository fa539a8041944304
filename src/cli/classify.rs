use clap::Parser;

/// Arguments for the classify command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  packsmith classify https://github.com/acme/tool\n  \
                  packsmith classify https://github.com/acme/tool/archive/v1.0.tar.gz")]
pub struct ClassifyArgs {
    /// Remote URL to classify
    pub url: String,
}
