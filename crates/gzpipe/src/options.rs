//! Transcoder options

use crate::error::{TranscodeError, TranscodeResult};
use flate2::Compression;

/// Smallest accepted chunk size
pub const MIN_CHUNK_SIZE: usize = 1;

/// Largest accepted chunk size (16 MiB)
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Default chunk size used when streaming between files
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Default gzip level, the same balance zlib picks
pub const DEFAULT_LEVEL: u32 = 6;

/// Highest gzip level
pub const MAX_LEVEL: u32 = 9;

/// Tunables for a [`Transcoder`](crate::Transcoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Bytes moved per read/write step
    pub chunk_size: usize,
    /// gzip compression level, `0..=9`
    pub level: u32,
    /// Copy non-gzip input verbatim when decompressing
    pub passthrough: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            level: DEFAULT_LEVEL,
            passthrough: true,
        }
    }
}

impl TranscodeOptions {
    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the compression level.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable passthrough of non-gzip input.
    pub fn with_passthrough(mut self, passthrough: bool) -> Self {
        self.passthrough = passthrough;
        self
    }

    /// Check every field against its supported range.
    pub fn validate(&self) -> TranscodeResult<()> {
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(TranscodeError::InvalidChunkSize {
                size: self.chunk_size,
                min: MIN_CHUNK_SIZE,
                max: MAX_CHUNK_SIZE,
            });
        }

        if self.level > MAX_LEVEL {
            return Err(TranscodeError::InvalidLevel(self.level));
        }

        Ok(())
    }

    pub(crate) fn compression(&self) -> Compression {
        Compression::new(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = TranscodeOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.compression(), Compression::default());
        assert!(options.passthrough);
    }

    #[test]
    fn test_chunk_size_bounds() {
        assert!(
            TranscodeOptions::default()
                .with_chunk_size(MIN_CHUNK_SIZE)
                .validate()
                .is_ok()
        );
        assert!(
            TranscodeOptions::default()
                .with_chunk_size(MAX_CHUNK_SIZE)
                .validate()
                .is_ok()
        );

        let err = TranscodeOptions::default()
            .with_chunk_size(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            TranscodeError::InvalidChunkSize {
                size: 0,
                min: MIN_CHUNK_SIZE,
                max: MAX_CHUNK_SIZE
            }
        ));

        assert!(
            TranscodeOptions::default()
                .with_chunk_size(MAX_CHUNK_SIZE + 1)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_level_bounds() {
        for level in 0..=MAX_LEVEL {
            assert!(
                TranscodeOptions::default()
                    .with_level(level)
                    .validate()
                    .is_ok()
            );
        }

        let err = TranscodeOptions::default()
            .with_level(10)
            .validate()
            .unwrap_err();
        assert!(matches!(err, TranscodeError::InvalidLevel(10)));
    }
}
