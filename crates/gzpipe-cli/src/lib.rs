//! Command-line front end for the gzpipe transcoder.
//!
//! ```text
//! gzpipe c <input_path> <output_path>   # compress
//! gzpipe d <input_path> <output_path>   # decompress
//! ```
//!
//! The library half holds argument parsing, logging setup and the exit
//! status policy so they can be tested without spawning the binary.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod app;
pub mod config;
pub mod logging;

pub use app::{Status, execute, run, status_for};
pub use config::{CliConfig, LogLevel};
