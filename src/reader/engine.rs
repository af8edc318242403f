//! Core buffered reader.
//!
//! [`Reader`] batches small reads from an unbuffered source into one
//! fixed-capacity window and serves bounded, single-byte and delimiter reads
//! from memory until the window runs dry.
//!
//! Every operation that needs new bytes performs at most one source read per
//! refill, and every refill reports one of three outcomes: bytes, clean
//! end-of-stream, or failure. Failures are never folded into end-of-stream.
//!
//! # Example
//!
//! ```
//! use rbuf::Reader;
//! use std::io::Cursor;
//!
//! let mut reader = Reader::new(Cursor::new(&b"+OK\r\nrest"[..]));
//!
//! assert_eq!(reader.read_byte()?, Some(b'+'));
//!
//! let line = reader.read_string(b'\n')?;
//! assert!(line.is_complete());
//! assert_eq!(&line.data[..], b"OK\r\n");
//!
//! let tail = reader.read_string(b'\n')?;
//! assert!(!tail.is_complete());
//! assert_eq!(&tail.data[..], b"rest");
//! # Ok::<(), rbuf::ReadError>(())
//! ```

use std::io::{self, BufRead, Read};

use bytes::Bytes;

use crate::buffer::{Fill, Window};
use crate::config::ReaderConfig;
use crate::error::ReadError;
use crate::line::{Line, Scan};
use crate::reader::Split;

/// A buffered reader over a blocking byte source.
///
/// `Reader` holds a source and a fixed-capacity window. It never opens or
/// closes the source: pass `&mut S` (or `&File`, `&TcpStream`) to keep the
/// handle, or recover it with [`into_inner`](Self::into_inner). Dropping a
/// `Reader` performs no I/O.
///
/// # Reads
///
/// - [`read`](Self::read) - Up to `dst.len()` bytes from at most one source read
/// - [`read_byte`](Self::read_byte) - One byte, or `None` at end-of-stream
/// - [`read_string`](Self::read_string) - Bytes up to and including a delimiter
///
/// Method-call syntax always picks the inherent `read` and `read_exact`, which
/// return [`ReadError`], even with `std::io::Read` in scope. Use
/// `io::Read::read(&mut reader, buf)` for the `io::Result` versions.
///
/// # Thread safety
///
/// Operations mutate the window in place; share a `Reader` across threads
/// only behind external synchronization.
#[derive(Debug)]
pub struct Reader<R> {
    source: R,
    window: Window,
    config: ReaderConfig,
}

impl<R> Reader<R> {
    /// Creates a reader with a [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY)
    /// window. No I/O happens here.
    pub fn new(source: R) -> Self {
        Self::from_parts(source, ReaderConfig::default())
    }

    /// Creates a reader with a window of `capacity` bytes.
    ///
    /// A capacity of `0` selects [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY).
    ///
    /// # Example
    ///
    /// ```
    /// use rbuf::{Reader, DEFAULT_CAPACITY};
    /// use std::io::empty;
    ///
    /// assert_eq!(Reader::with_capacity(empty(), 64).capacity(), 64);
    /// assert_eq!(Reader::with_capacity(empty(), 0).capacity(), DEFAULT_CAPACITY);
    /// ```
    pub fn with_capacity(source: R, capacity: usize) -> Self {
        Self::from_parts(source, ReaderConfig::new(capacity))
    }

    /// Creates a reader from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn with_config(source: R, config: ReaderConfig) -> Result<Self, ReadError> {
        config.validate()?;
        Ok(Self::from_parts(source, config))
    }

    fn from_parts(source: R, config: ReaderConfig) -> Self {
        Self {
            source,
            window: Window::with_capacity(config.capacity()),
            config,
        }
    }

    /// Returns the number of bytes servable without touching the source.
    pub fn buffered(&self) -> usize {
        self.window.buffered()
    }

    /// Returns the window capacity.
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Returns the unread bytes currently held in the window.
    pub fn buffer(&self) -> &[u8] {
        self.window.unread()
    }

    /// Returns the configuration used by this reader.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Gets a reference to the source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Gets a mutable reference to the source.
    ///
    /// Reading from it directly skips whatever is still buffered.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Returns the source. Unread buffered bytes are dropped.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Reader<R> {
    /// Reads up to `dst.len()` bytes.
    ///
    /// Serves from the window when it holds unread bytes, without touching
    /// the source. Otherwise issues exactly one source read: directly into
    /// `dst` when `dst` is at least as large as the window, into the window
    /// otherwise.
    ///
    /// Returns `Ok(0)` for an empty `dst` (no source access) or at
    /// end-of-stream.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source read fails. No bytes are consumed.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, ReadError> {
        if dst.is_empty() {
            return Ok(0);
        }

        if self.window.is_empty() {
            if dst.len() >= self.window.capacity() {
                log::debug!("bypass: {} byte read goes straight to source", dst.len());
                return self.source.read(dst).map_err(ReadError::from_source);
            }
            if self.refill()? == Fill::Eof {
                return Ok(0);
            }
        }

        Ok(self.window.copy_to(dst))
    }

    /// Reads a single byte.
    ///
    /// Returns `Ok(None)` at end-of-stream. The byte value range is never
    /// used as a signal.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source read fails.
    pub fn read_byte(&mut self) -> Result<Option<u8>, ReadError> {
        if self.window.is_empty() {
            self.refill()?;
        }
        Ok(self.window.pop())
    }

    /// Reads up to and including the first `delim`, across as many refills
    /// as it takes.
    ///
    /// The returned [`Line`] is complete when it ends with `delim`, partial
    /// when the stream ended first. A partial line may be empty.
    ///
    /// Without [`max_line_len`](ReaderConfig::with_max_line_len), a source
    /// that never produces `delim` grows the result to the rest of the
    /// stream.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if a source read fails, [`ReadError::LineTooLong`]
    /// if the line limit is hit. Bytes read so far are dropped; use
    /// [`read_string_into`](Self::read_string_into) to keep them.
    pub fn read_string(&mut self, delim: u8) -> Result<Line, ReadError> {
        let mut out = Vec::new();
        let complete = self.read_string_into(delim, &mut out)?;
        Ok(Line {
            data: Bytes::from(out),
            complete,
        })
    }

    /// Appends bytes up to and including the first `delim` to `out`.
    ///
    /// Returns `Ok(true)` if the delimiter was found, `Ok(false)` if the
    /// stream ended first. On error, bytes consumed before the failure remain
    /// in `out`.
    ///
    /// # Example
    ///
    /// ```
    /// use rbuf::{Reader, ReaderConfig, ReadError};
    /// use std::io::Cursor;
    ///
    /// let config = ReaderConfig::new(4).with_max_line_len(6);
    /// let mut reader = Reader::with_config(Cursor::new(&b"abcdefgh\n"[..]), config)?;
    ///
    /// let mut out = Vec::new();
    /// let err = reader.read_string_into(b'\n', &mut out).unwrap_err();
    /// assert!(matches!(err, ReadError::LineTooLong { limit: 6 }));
    /// assert_eq!(out, b"abcdef");
    /// # Ok::<(), rbuf::ReadError>(())
    /// ```
    pub fn read_string_into(&mut self, delim: u8, out: &mut Vec<u8>) -> Result<bool, ReadError> {
        let mut scan = Scan::new(delim, self.config.max_line_len());
        loop {
            if scan.advance(&mut self.window, out)? {
                return Ok(true);
            }
            match self.refill()? {
                Fill::Filled(_) => {}
                Fill::Eof | Fill::Full => return Ok(false),
            }
        }
    }

    /// Fills `dst` completely.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] with [`io::ErrorKind::UnexpectedEof`] if the stream
    /// ends first; the bytes read so far are consumed.
    pub fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), ReadError> {
        let mut filled = 0;
        while filled < dst.len() {
            match Self::read(self, &mut dst[filled..])? {
                0 => {
                    return Err(ReadError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "failed to fill whole buffer",
                    )));
                }
                n => filled += n,
            }
        }
        Ok(())
    }

    /// Turns this reader into an iterator over `delim`-terminated lines.
    ///
    /// # Example
    ///
    /// ```
    /// use rbuf::Reader;
    /// use std::io::Cursor;
    ///
    /// let lines: Vec<_> = Reader::new(Cursor::new(&b"a\nb\nc"[..]))
    ///     .split(b'\n')
    ///     .collect::<Result<_, _>>()?;
    ///
    /// assert_eq!(lines.len(), 3);
    /// assert!(!lines[2].is_complete());
    /// # Ok::<(), rbuf::ReadError>(())
    /// ```
    pub fn split(self, delim: u8) -> Split<R> {
        Split::new(self, delim)
    }

    /// One source read into the window's free tail.
    fn refill(&mut self) -> Result<Fill, ReadError> {
        match self.window.fill_from(&mut self.source) {
            Ok(Fill::Eof) => {
                log::debug!("source reached end-of-stream");
                Ok(Fill::Eof)
            }
            Ok(fill) => Ok(fill),
            Err(e) => Err(ReadError::from_source(e)),
        }
    }
}

impl<R: Read> Read for Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Self::read(self, buf).map_err(io::Error::from)
    }
}

impl<R: Read> BufRead for Reader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.window.is_empty() {
            self.refill()?;
        }
        Ok(self.window.unread())
    }

    fn consume(&mut self, amt: usize) {
        self.window.consume(amt);
    }
}
