//! Transcode statistics and reporting

use crate::mode::Mode;
use std::fmt;

/// Byte counts produced by a successful transcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeStats {
    /// Direction of the transcode
    pub mode: Mode,
    /// Bytes pulled from the input file
    pub bytes_read: u64,
    /// Bytes pushed into the output file
    pub bytes_written: u64,
}

impl TranscodeStats {
    /// Size of the uncompressed side.
    pub const fn raw_bytes(&self) -> u64 {
        match self.mode {
            Mode::Compress => self.bytes_read,
            Mode::Decompress => self.bytes_written,
        }
    }

    /// Size of the gzip side.
    pub const fn compressed_bytes(&self) -> u64 {
        match self.mode {
            Mode::Compress => self.bytes_written,
            Mode::Decompress => self.bytes_read,
        }
    }

    /// Percentage size reduction, `(1 - compressed/raw) * 100`.
    ///
    /// Returns `None` for an empty raw side, where the ratio is undefined.
    /// The result is negative when the gzip framing outweighs the savings.
    #[allow(clippy::cast_precision_loss)]
    pub fn compression_factor(&self) -> Option<f64> {
        let raw = self.raw_bytes();
        if raw == 0 {
            return None;
        }
        Some((1.0 - self.compressed_bytes() as f64 / raw as f64) * 100.0)
    }
}

/// Summary line, e.g. `read 1024 bytes, write 40 bytes, compression factor 96.09%`
impl fmt::Display for TranscodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read {} bytes, write {} bytes, compression factor {:.2}%",
            self.bytes_read,
            self.bytes_written,
            self.compression_factor().unwrap_or(0.0)
        )
    }
}
