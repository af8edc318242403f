//! The Line type - the result of a delimiter read.

use bytes::Bytes;
use std::fmt;

/// Bytes returned by a delimiter read.
///
/// `complete` is `true` when the scan stopped at the delimiter, in which case
/// the delimiter is the last byte of `data`. It is `false` when the source
/// reached end-of-stream first; `data` then holds whatever was left (possibly
/// nothing).
///
/// # Example
///
/// ```
/// use rbuf::Line;
/// use bytes::Bytes;
///
/// let line = Line::complete(Bytes::from_static(b"PING\r\n"));
/// assert!(line.is_complete());
/// assert_eq!(line.content(b'\n'), b"PING\r");
///
/// let tail = Line::partial(Bytes::from_static(b"PIN"));
/// assert!(!tail.is_complete());
/// assert_eq!(tail.content(b'\n'), b"PIN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The accumulated bytes, delimiter included when `complete`.
    pub data: Bytes,

    /// Whether the delimiter was found.
    pub complete: bool,
}

impl Line {
    /// A line terminated by its delimiter.
    pub fn complete(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            complete: true,
        }
    }

    /// Bytes that reached end-of-stream without a delimiter.
    pub fn partial(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            complete: false,
        }
    }

    /// Returns the number of bytes, delimiter included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no bytes were read.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the delimiter was found.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns a reference to the bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// The bytes with the trailing `delim` removed, if this line is complete
    /// and ends with it.
    pub fn content(&self, delim: u8) -> &[u8] {
        match self.data.split_last() {
            Some((&last, rest)) if self.complete && last == delim => rest,
            _ => &self.data,
        }
    }

    /// Consumes the line and returns the underlying bytes.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Splits the line into (data, complete).
    pub fn into_parts(self) -> (Bytes, bool) {
        (self.data, self.complete)
    }
}

impl From<Line> for Bytes {
    fn from(line: Line) -> Self {
        line.data
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({} bytes", self.len())?;
        if !self.complete {
            write!(f, ", partial")?;
        }
        write!(f, ")")
    }
}
