//! gzpipe binary entry point.
//!
//! Parses arguments, installs logging and hands off to the library. Argument
//! errors exit through clap with usage on standard error.

use gzpipe_cli::CliConfig;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let config = CliConfig::from_args();

    gzpipe_cli::logging::init(config.log_level)?;

    Ok(gzpipe_cli::run(&config))
}
