//! Error types for file transcoding

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of a transcode a file handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRole {
    /// The file being read
    Input,
    /// The file being written
    Output,
}

impl fmt::Display for StreamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Transcoding error type
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Mode flag was neither `c` nor `d`
    #[error("Unrecognized compress/decompress flag: {0}")]
    UnknownMode(String),

    /// Input or output file could not be opened
    #[error("failed to open {role} file {}: {source}", path.display())]
    Open {
        /// Which file failed to open
        role: StreamRole,
        /// Path that was being opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading from the input failed, including corrupt gzip data
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing to the output failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The output stopped accepting bytes part way through a chunk
    #[error("short write to {}: {accepted} of {expected} bytes accepted", path.display())]
    ShortWrite {
        /// Output path
        path: PathBuf,
        /// Bytes in the chunk
        expected: usize,
        /// Bytes the sink took before refusing more
        accepted: usize,
    },

    /// Input lacks the gzip magic and passthrough is disabled
    #[error("not in gzip format: {}", path.display())]
    NotGzip {
        /// Input path
        path: PathBuf,
    },

    /// Chunk size outside the supported range
    #[error("invalid chunk size: {size} bytes (must be between {min} and {max} bytes)")]
    InvalidChunkSize {
        /// The invalid size that was provided
        size: usize,
        /// Minimum allowed size
        min: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Compression level outside `0..=9`
    #[error("compression level {0} is outside the supported range 0-9")]
    InvalidLevel(u32),
}

impl TranscodeError {
    /// Whether the error was raised by option validation before any file was touched.
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownMode(_) | Self::InvalidChunkSize { .. } | Self::InvalidLevel(_)
        )
    }
}

/// Result type for transcode operations
pub type TranscodeResult<T> = Result<T, TranscodeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_open_error_names_role_and_path() {
        let err = TranscodeError::Open {
            role: StreamRole::Output,
            path: PathBuf::from("/no/such/dir/out.gz"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to open output file /no/such/dir/out.gz"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_unknown_mode_message() {
        let err = TranscodeError::UnknownMode("x".to_string());
        assert_eq!(err.to_string(), "Unrecognized compress/decompress flag: x");
        assert!(err.is_config_error());
    }

    #[test]
    fn test_short_write_message() {
        let err = TranscodeError::ShortWrite {
            path: PathBuf::from("out.gz"),
            expected: 128,
            accepted: 64,
        };
        assert_eq!(
            err.to_string(),
            "short write to out.gz: 64 of 128 bytes accepted"
        );
    }
}
