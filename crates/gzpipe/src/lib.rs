//! Streaming gzip file transcoder
//!
//! Compresses a file into a gzip stream or decompresses a gzip stream back
//! into a file, moving the data in fixed-size chunks so neither side is ever
//! held in memory. The gzip format itself is handled by `flate2`.
//!
//! # Example
//!
//! ```no_run
//! use gzpipe::{Mode, TranscodeOptions, TranscodeRequest, Transcoder};
//!
//! let transcoder = Transcoder::new(TranscodeOptions::default().with_level(9))?;
//! let request = TranscodeRequest::new(Mode::Compress, "hello.c", "hello.c.gz");
//! let stats = transcoder.transcode(&request)?;
//! println!("{stats}");
//! # Ok::<(), gzpipe::TranscodeError>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod counting;
pub mod error;
pub mod gzip;
pub mod mode;
pub mod options;
pub mod stats;
pub mod transcoder;

pub use error::{StreamRole, TranscodeError, TranscodeResult};
pub use gzip::{GZIP_MAGIC, InputFormat};
pub use mode::Mode;
pub use options::{
    DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, MAX_CHUNK_SIZE, MAX_LEVEL, MIN_CHUNK_SIZE,
    TranscodeOptions,
};
pub use stats::TranscodeStats;
pub use transcoder::{TranscodeRequest, Transcoder, transcode};
