//! Command-line configuration.
//!
//! Everything is supplied as arguments, with environment variable fallbacks
//! for the tunables:
//! - `GZPIPE_LEVEL`: gzip compression level (0-9)
//! - `GZPIPE_CHUNK_SIZE`: bytes moved per read/write step
//! - `GZPIPE_NO_PASSTHROUGH`: reject non-gzip input when decompressing
//! - `GZPIPE_STRICT`: exit with failure when the transcode itself fails
//! - `RUST_LOG`: overrides `--log-level`

use clap::Parser;
use gzpipe::{
    DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, Mode, TranscodeOptions, TranscodeRequest, TranscodeResult,
};
use std::path::PathBuf;
use tracing::Level;

/// Configuration parsed from the command line and environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gzpipe",
    about = "Compress or decompress a single file with gzip",
    version,
    override_usage = "gzpipe [OPTIONS] <c|d> <in> <out>",
    after_help = "e.g.\n    gzpipe c hello.c hello.c.gz\n    gzpipe d hello.c.gz hello.c.out"
)]
pub struct CliConfig {
    /// `c` to compress, `d` to decompress
    #[arg(value_name = "c|d")]
    pub mode: String,

    /// File to read
    #[arg(value_name = "in")]
    pub input: PathBuf,

    /// File to create or overwrite
    #[arg(value_name = "out")]
    pub output: PathBuf,

    /// gzip compression level (0 stores, 9 is smallest)
    #[arg(short, long, env = "GZPIPE_LEVEL", default_value_t = DEFAULT_LEVEL)]
    pub level: u32,

    /// Bytes moved per read/write step
    #[arg(long, env = "GZPIPE_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Fail instead of copying through input that is not gzip data
    #[arg(long, env = "GZPIPE_NO_PASSTHROUGH")]
    pub no_passthrough: bool,

    /// Exit with failure status when compression or decompression fails
    #[arg(long, env = "GZPIPE_STRICT")]
    pub strict: bool,

    /// Diagnostic verbosity (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    ///
    /// Exits the process with usage on malformed arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Build the transcode request, rejecting unknown mode letters.
    pub fn request(&self) -> TranscodeResult<TranscodeRequest> {
        let mode: Mode = self.mode.parse()?;
        Ok(TranscodeRequest::new(
            mode,
            self.input.clone(),
            self.output.clone(),
        ))
    }

    /// Transcoder options from the tunables.
    ///
    /// Not validated here; [`gzpipe::Transcoder::new`] does that.
    pub fn options(&self) -> TranscodeOptions {
        TranscodeOptions::default()
            .with_level(self.level)
            .with_chunk_size(self.chunk_size)
            .with_passthrough(!self.no_passthrough)
    }
}

/// Log verbosity selectable on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Every chunk
    Trace,
    /// Open and finish events
    Debug,
    /// Per-run summaries
    Info,
    /// Recoverable oddities such as non-gzip input
    Warn,
    /// Failures only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
