//! Classify command implementation

use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::source::classify;

/// Print `live-repository` or `static-archive`
pub fn run(args: ClassifyArgs) -> Result<()> {
    println!("{}", classify(&args.url));
    Ok(())
}
