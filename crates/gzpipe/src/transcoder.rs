//! Streaming file transcoder
//!
//! Moves bytes from an input file to an output file in fixed-size chunks,
//! passing them through a gzip encoder or decoder on the way. Both file
//! handles are owned by the running call and released when it returns,
//! whichever path it returns by.

use crate::counting::{CountingReader, CountingWriter};
use crate::error::{StreamRole, TranscodeError, TranscodeResult};
use crate::gzip::{GzMembers, InputFormat, PeekReader};
use crate::mode::Mode;
use crate::options::{DEFAULT_CHUNK_SIZE, TranscodeOptions};
use crate::stats::TranscodeStats;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// A single transcode job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeRequest {
    /// Direction
    pub mode: Mode,
    /// File to read
    pub input: PathBuf,
    /// File to create or truncate
    pub output: PathBuf,
}

impl TranscodeRequest {
    /// Create a request.
    pub fn new(mode: Mode, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Streams files through gzip according to a validated set of options
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    options: TranscodeOptions,
}

impl Transcoder {
    /// Create a transcoder, rejecting out-of-range options.
    pub fn new(options: TranscodeOptions) -> TranscodeResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Run a request in the direction it names.
    pub fn transcode(&self, request: &TranscodeRequest) -> TranscodeResult<TranscodeStats> {
        match request.mode {
            Mode::Compress => self.compress(&request.input, &request.output),
            Mode::Decompress => self.decompress(&request.input, &request.output),
        }
    }

    /// Compress `input` into a gzip file at `output`.
    pub fn compress(&self, input: &Path, output: &Path) -> TranscodeResult<TranscodeStats> {
        let mut source = CountingReader::new(open_input(input)?);
        let sink = CountingWriter::new(create_output(output)?);
        let mut encoder = GzEncoder::new(sink, self.options.compression());

        debug!(
            "Compressing {} -> {} (level {}, chunk size {})",
            input.display(),
            output.display(),
            self.options.level,
            self.options.chunk_size
        );

        pump(&mut source, &mut encoder, self.options.chunk_size, input, output)?;

        // Writes the gzip trailer; the file closes when `sink` drops.
        let sink = encoder
            .finish()
            .map_err(|source| write_error(output, source))?;

        let stats = TranscodeStats {
            mode: Mode::Compress,
            bytes_read: source.count(),
            bytes_written: sink.count(),
        };
        debug!("Compressed {}: {stats}", input.display());
        Ok(stats)
    }

    /// Decompress the gzip file at `input` into `output`.
    ///
    /// Concatenated gzip members decode back to back and bytes after the last
    /// member that are not another gzip header are ignored. Input without the
    /// gzip magic is copied unchanged when passthrough is enabled.
    pub fn decompress(&self, input: &Path, output: &Path) -> TranscodeResult<TranscodeStats> {
        let capacity = self.options.chunk_size.max(DEFAULT_CHUNK_SIZE);
        let file = CountingReader::new(open_input(input)?);
        let mut reader = PeekReader::new(BufReader::with_capacity(capacity, file));

        let format = reader.sniff().map_err(|source| read_error(input, source))?;
        if format == InputFormat::Plain && !self.options.passthrough {
            return Err(TranscodeError::NotGzip {
                path: input.to_path_buf(),
            });
        }

        let mut source = match format {
            InputFormat::Gzip => Decoded::Gzip(GzMembers::new(reader)),
            InputFormat::Plain => {
                warn!(
                    "{} is not in gzip format, copying it through unchanged",
                    input.display()
                );
                Decoded::Plain(reader)
            }
            InputFormat::Empty => Decoded::Plain(reader),
        };
        let mut sink = CountingWriter::new(create_output(output)?);

        debug!(
            "Decompressing {} -> {} ({format:?}, chunk size {})",
            input.display(),
            output.display(),
            self.options.chunk_size
        );

        pump(&mut source, &mut sink, self.options.chunk_size, input, output)?;
        sink.flush().map_err(|source| write_error(output, source))?;

        if let Decoded::Gzip(members) = &source {
            debug!("Decoded {} gzip member(s)", members.members());
        }

        let stats = TranscodeStats {
            mode: Mode::Decompress,
            bytes_read: source.consumed(),
            bytes_written: sink.count(),
        };
        debug!("Decompressed {}: {stats}", input.display());
        Ok(stats)
    }
}

/// Transcode with default options.
///
/// # Example
///
/// ```no_run
/// use gzpipe::{Mode, transcode};
///
/// let stats = transcode(Mode::Compress, "hello.c", "hello.c.gz")?;
/// println!("{stats}");
/// transcode(Mode::Decompress, "hello.c.gz", "hello.c.out")?;
/// # Ok::<(), gzpipe::TranscodeError>(())
/// ```
pub fn transcode(
    mode: Mode,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> TranscodeResult<TranscodeStats> {
    Transcoder::default().transcode(&TranscodeRequest::new(
        mode,
        input.as_ref(),
        output.as_ref(),
    ))
}

/// Decompression source: either the gzip members or the raw bytes
enum Decoded<R: BufRead> {
    Gzip(GzMembers<R>),
    Plain(PeekReader<R>),
}

impl<R: BufRead> Read for Decoded<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Gzip(members) => members.read(buf),
            Self::Plain(reader) => reader.read(buf),
        }
    }
}

impl<R: Read> Decoded<BufReader<CountingReader<R>>> {
    /// Bytes taken from the input file so far.
    fn consumed(&self) -> u64 {
        let buffered = match self {
            Self::Gzip(members) => members.get_ref(),
            Self::Plain(reader) => Some(reader.get_ref()),
        };
        buffered.map_or(0, |reader| reader.get_ref().count())
    }
}

fn open_input(path: &Path) -> TranscodeResult<File> {
    File::open(path).map_err(|source| TranscodeError::Open {
        role: StreamRole::Input,
        path: path.to_path_buf(),
        source,
    })
}

fn create_output(path: &Path) -> TranscodeResult<File> {
    File::create(path).map_err(|source| TranscodeError::Open {
        role: StreamRole::Output,
        path: path.to_path_buf(),
        source,
    })
}

fn read_error(path: &Path, source: io::Error) -> TranscodeError {
    TranscodeError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn write_error(path: &Path, source: io::Error) -> TranscodeError {
    TranscodeError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Copy `reader` into `writer` one chunk at a time.
fn pump<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
    input: &Path,
    output: &Path,
) -> TranscodeResult<()> {
    let mut buffer = vec![0u8; chunk_size];
    let mut total = 0u64;
    let mut chunks = 0usize;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(read_error(input, source)),
        };

        write_chunk(writer, &buffer[..n], output)?;
        total += n as u64;
        chunks += 1;
        trace!("Chunk {chunks}: {n} bytes ({total} total)");
    }

    Ok(())
}

/// Write one chunk, failing if the sink stops taking bytes before the end.
fn write_chunk<W: Write>(writer: &mut W, chunk: &[u8], output: &Path) -> TranscodeResult<()> {
    let mut accepted = 0;
    while accepted < chunk.len() {
        match writer.write(&chunk[accepted..]) {
            Ok(0) => {
                return Err(TranscodeError::ShortWrite {
                    path: output.to_path_buf(),
                    expected: chunk.len(),
                    accepted,
                });
            }
            Ok(n) => accepted += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(source) => return Err(write_error(output, source)),
        }
    }
    Ok(())
}
