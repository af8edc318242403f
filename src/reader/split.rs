//! Iterator over delimiter-terminated lines.

use std::io::Read;

use crate::error::ReadError;
use crate::line::Line;
use crate::reader::Reader;

/// An iterator that yields lines from a [`Reader`].
///
/// Created by [`Reader::split`]. Every item but the last is a complete
/// [`Line`]. The last one is partial when the stream ends without a trailing
/// delimiter; an empty tail is not yielded. The iterator stops after the
/// first error.
///
/// # Example
///
/// ```
/// use rbuf::Reader;
/// use std::io::Cursor;
///
/// let reader = Reader::new(Cursor::new(&b"SET k v\r\nGET k\r\n"[..]));
///
/// for line in reader.split(b'\n') {
///     let line = line?;
///     assert!(line.is_complete());
///     println!("{:?}", line.content(b'\n'));
/// }
/// # Ok::<(), rbuf::ReadError>(())
/// ```
#[derive(Debug)]
pub struct Split<R> {
    reader: Reader<R>,
    delim: u8,
    finished: bool,
}

impl<R> Split<R> {
    pub(crate) fn new(reader: Reader<R>, delim: u8) -> Self {
        Self {
            reader,
            delim,
            finished: false,
        }
    }

    /// Returns the delimiter this iterator splits on.
    pub fn delimiter(&self) -> u8 {
        self.delim
    }

    /// Returns the underlying reader, keeping any buffered bytes.
    pub fn into_inner(self) -> Reader<R> {
        self.reader
    }
}

impl<R: Read> Iterator for Split<R> {
    type Item = Result<Line, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.read_string(self.delim) {
            Ok(line) if line.is_complete() => Some(Ok(line)),
            Ok(line) => {
                self.finished = true;
                if line.is_empty() { None } else { Some(Ok(line)) }
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
