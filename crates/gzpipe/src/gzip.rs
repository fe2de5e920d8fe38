//! gzip framing on the read side
//!
//! Decoding follows zlib's `gzread`: members are decoded back to back for as
//! long as the bytes after a member start with the gzip magic. Anything else
//! after a member (tape padding, trailing garbage) ends the stream quietly.

use flate2::bufread::GzDecoder;
use std::io::{self, BufRead, ErrorKind, Read};
use tracing::debug;

/// gzip member magic bytes (RFC 1952)
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// What the first bytes of an input look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Starts with [`GZIP_MAGIC`]
    Gzip,
    /// Anything else
    Plain,
    /// No bytes at all
    Empty,
}

/// Buffered reader that can look further ahead than one `fill_buf` returns.
///
/// Peeked bytes are held in front of the inner reader until consumed.
#[derive(Debug)]
pub struct PeekReader<R> {
    pending: Vec<u8>,
    pos: usize,
    inner: R,
}

impl<R: BufRead> PeekReader<R> {
    /// Wrap a buffered reader.
    pub const fn new(inner: R) -> Self {
        Self {
            pending: Vec::new(),
            pos: 0,
            inner,
        }
    }

    /// Return at least `n` upcoming bytes without consuming them.
    ///
    /// Fewer than `n` bytes come back only at end of input.
    pub fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        if self.pos > 0 {
            self.pending.drain(..self.pos);
            self.pos = 0;
        }

        while self.pending.len() < n {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            let take = available.len().min(n - self.pending.len());
            self.pending.extend_from_slice(&available[..take]);
            self.inner.consume(take);
        }

        Ok(&self.pending)
    }

    /// Classify the upcoming bytes.
    pub fn sniff(&mut self) -> io::Result<InputFormat> {
        let head = self.peek(GZIP_MAGIC.len())?;
        Ok(if head.is_empty() {
            InputFormat::Empty
        } else if head.starts_with(&GZIP_MAGIC) {
            InputFormat::Gzip
        } else {
            InputFormat::Plain
        })
    }

    /// The wrapped reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }
}

impl<R: BufRead> BufRead for PeekReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos < self.pending.len() {
            Ok(&self.pending[self.pos..])
        } else {
            self.inner.fill_buf()
        }
    }

    fn consume(&mut self, amt: usize) {
        if self.pos < self.pending.len() {
            self.pos = (self.pos + amt).min(self.pending.len());
        } else {
            self.inner.consume(amt);
        }
    }
}

impl<R: BufRead> Read for PeekReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

/// Decoder for one or more concatenated gzip members.
pub struct GzMembers<R: BufRead> {
    current: Option<GzDecoder<PeekReader<R>>>,
    tail: Option<PeekReader<R>>,
    members: usize,
}

impl<R: BufRead> GzMembers<R> {
    /// Start decoding at a gzip member header.
    pub fn new(reader: PeekReader<R>) -> Self {
        Self {
            current: Some(GzDecoder::new(reader)),
            tail: None,
            members: 1,
        }
    }

    /// Number of members started so far.
    pub const fn members(&self) -> usize {
        self.members
    }

    /// The reader underneath the decoder, if the stream has not failed.
    pub fn get_ref(&self) -> Option<&R> {
        match (&self.current, &self.tail) {
            (Some(decoder), _) => Some(decoder.get_ref().get_ref()),
            (None, Some(tail)) => Some(tail.get_ref()),
            (None, None) => None,
        }
    }

    /// Move past a finished member: either open the next one or stop.
    fn advance(&mut self) -> io::Result<()> {
        let Some(finished) = self.current.take() else {
            return Ok(());
        };
        let mut rest = finished.into_inner();

        match rest.sniff()? {
            InputFormat::Gzip => {
                self.members += 1;
                self.current = Some(GzDecoder::new(rest));
            }
            InputFormat::Plain => {
                debug!("Ignoring trailing bytes after gzip member {}", self.members);
                self.tail = Some(rest);
            }
            InputFormat::Empty => self.tail = Some(rest),
        }
        Ok(())
    }
}

impl<R: BufRead> Read for GzMembers<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while let Some(decoder) = self.current.as_mut() {
            let n = decoder.read(buf)?;
            if n > 0 || buf.is_empty() {
                return Ok(n);
            }
            self.advance()?;
        }
        Ok(0)
    }
}
