use clap::Parser;

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  packsmith validate https://git.example.com/acme/tool.git\n  \
                  packsmith validate git@git.example.com:acme/tool.git --timeout 5")]
pub struct ValidateArgs {
    /// Remote URL to probe
    pub url: String,

    /// Seconds to wait for the remote before giving up (0 gives up at once)
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    pub timeout: u64,
}
