use clap::Parser;
use std::path::PathBuf;

/// Arguments for the fetch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Clone into the current directory at HEAD:\n    packsmith fetch https://github.com/acme/tool\n\n\
                  Check out a tag into a chosen directory:\n    packsmith fetch https://github.com/acme/tool --workdir /tmp/build --ref v1.2.3 --dirname tool-src\n\n\
                  Shallow clone of a branch:\n    packsmith fetch https://github.com/acme/tool -o depth=1 -o branch=main")]
pub struct FetchArgs {
    /// Remote URL of the git source
    pub url: String,

    /// Directory the source is cloned into (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Ref to check out (branch, tag or commit)
    #[arg(long = "ref", value_name = "REF", default_value = "HEAD")]
    pub git_ref: String,

    /// Name of the clone directory (defaults to the repository name)
    #[arg(long)]
    pub dirname: Option<String>,

    /// Clone option as key=value (depth, branch, bare, recurse-submodules)
    #[arg(long = "clone-option", short = 'o', value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub clone_options: Vec<(String, String)>,

    /// Seconds to wait for the remote probe
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    pub timeout: u64,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
