//! Transcode direction

use crate::error::TranscodeError;
use std::fmt;
use std::str::FromStr;

/// Direction of a transcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Raw bytes in, gzip stream out
    Compress,
    /// Gzip stream in, raw bytes out
    Decompress,
}

impl FromStr for Mode {
    type Err = TranscodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(Self::Compress),
            "d" => Ok(Self::Decompress),
            other => Err(TranscodeError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compress => f.write_str("compress"),
            Self::Decompress => f.write_str("decompress"),
        }
    }
}
