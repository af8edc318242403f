//! Fixed byte arena with read/write cursors.
//!
//! ```text
//! buf: [ consumed | unread data | free space ]
//!        0..read    read..write   write..capacity
//! ```

use std::cmp;
use std::io::{self, Read};

/// Outcome of one refill attempt.
///
/// Failures travel separately as `Err`, so every caller can tell a clean
/// end-of-stream from a broken source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fill {
    /// The source produced this many bytes.
    Filled(usize),
    /// The source reported end-of-stream.
    Eof,
    /// No free space after compaction; the source was not contacted.
    Full,
}

/// A fixed-capacity buffer with a read cursor and a write cursor.
///
/// # Invariants
///
/// `0 <= read <= write <= buf.len()` holds after every mutation, and
/// `buf.len() >= 1`.
#[derive(Debug)]
pub(crate) struct Window {
    buf: Box<[u8]>,
    /// First unread byte.
    read: usize,
    /// One past the last unread byte.
    write: usize,
}

impl Window {
    /// Allocates a window of `capacity` bytes (at least one).
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; cmp::max(capacity, 1)].into_boxed_slice(),
            read: 0,
            write: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of unread bytes.
    #[inline]
    pub(crate) fn buffered(&self) -> usize {
        self.write - self.read
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.read == self.write
    }

    /// The unread region.
    #[inline]
    pub(crate) fn unread(&self) -> &[u8] {
        &self.buf[self.read..self.write]
    }

    /// Marks up to `amt` unread bytes as consumed.
    #[inline]
    pub(crate) fn consume(&mut self, amt: usize) {
        self.read = cmp::min(self.read + amt, self.write);
        self.check();
    }

    /// Copies as many unread bytes as fit into `dst` and consumes them.
    pub(crate) fn copy_to(&mut self, dst: &mut [u8]) -> usize {
        let n = cmp::min(dst.len(), self.buffered());
        dst[..n].copy_from_slice(&self.buf[self.read..self.read + n]);
        self.consume(n);
        n
    }

    /// Takes the next unread byte.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<u8> {
        let byte = self.unread().first().copied()?;
        self.consume(1);
        Some(byte)
    }

    /// Index of `delim` within the first `max` unread bytes.
    #[inline]
    pub(crate) fn find(&self, delim: u8, max: usize) -> Option<usize> {
        let unread = self.unread();
        memchr::memchr(delim, &unread[..cmp::min(unread.len(), max)])
    }

    /// Slides the unread region to offset 0.
    pub(crate) fn compact(&mut self) {
        if self.read == 0 {
            return;
        }
        self.buf.copy_within(self.read..self.write, 0);
        self.write -= self.read;
        self.read = 0;
        self.check();
    }

    /// Compacts and returns the free tail, or `None` when the window is full.
    pub(crate) fn prepare_fill(&mut self) -> Option<&mut [u8]> {
        self.compact();
        if self.write >= self.buf.len() {
            return None;
        }
        Some(&mut self.buf[self.write..])
    }

    /// Records the result of a source read into the tail handed out by
    /// [`prepare_fill`](Self::prepare_fill).
    ///
    /// A count larger than the free tail is an `InvalidData` error and leaves
    /// the window untouched.
    pub(crate) fn commit(&mut self, n: usize) -> io::Result<Fill> {
        if n == 0 {
            return Ok(Fill::Eof);
        }
        let free = self.buf.len() - self.write;
        if n > free {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("source reported {} bytes into {} free", n, free),
            ));
        }
        self.write += n;
        self.check();
        Ok(Fill::Filled(n))
    }

    /// Issues exactly one read against `source` into the free tail.
    pub(crate) fn fill_from<R: Read + ?Sized>(&mut self, source: &mut R) -> io::Result<Fill> {
        let Some(tail) = self.prepare_fill() else {
            return Ok(Fill::Full);
        };
        let requested = tail.len();
        let n = source.read(tail)?;
        log::trace!("refill: requested {} bytes, source produced {}", requested, n);
        self.commit(n)
    }

    #[inline]
    fn check(&self) {
        debug_assert!(self.read <= self.write && self.write <= self.buf.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_window_starts_empty() {
        let window = Window::with_capacity(8);
        assert_eq!(window.capacity(), 8);
        assert_eq!(window.buffered(), 0);
        assert!(window.is_empty());
        assert!(window.unread().is_empty());
    }

    #[test]
    fn test_window_minimum_capacity() {
        assert_eq!(Window::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_fill_from_reads_once() {
        let mut window = Window::with_capacity(4);
        let mut src = Cursor::new(&b"abcdef"[..]);

        assert_eq!(window.fill_from(&mut src).unwrap(), Fill::Filled(4));
        assert_eq!(window.unread(), b"abcd");

        // Full window: no source access
        assert_eq!(window.fill_from(&mut src).unwrap(), Fill::Full);
        assert_eq!(src.position(), 4);
    }

    #[test]
    fn test_fill_from_eof() {
        let mut window = Window::with_capacity(4);
        let mut src = Cursor::new(&b""[..]);
        assert_eq!(window.fill_from(&mut src).unwrap(), Fill::Eof);
        assert!(window.is_empty());
    }

    #[test]
    fn test_fill_compacts_first() {
        let mut window = Window::with_capacity(4);
        let mut src = Cursor::new(&b"abcdef"[..]);
        window.fill_from(&mut src).unwrap();

        window.consume(3);
        assert_eq!(window.unread(), b"d");

        assert_eq!(window.fill_from(&mut src).unwrap(), Fill::Filled(2));
        assert_eq!(window.unread(), b"def");
        assert_eq!(window.buffered(), 3);
    }

    #[test]
    fn test_copy_to_and_pop() {
        let mut window = Window::with_capacity(8);
        let mut src = Cursor::new(&b"hello"[..]);
        window.fill_from(&mut src).unwrap();

        let mut dst = [0u8; 2];
        assert_eq!(window.copy_to(&mut dst), 2);
        assert_eq!(&dst, b"he");
        assert_eq!(window.pop(), Some(b'l'));
        assert_eq!(window.buffered(), 2);

        let mut dst = [0u8; 10];
        assert_eq!(window.copy_to(&mut dst), 2);
        assert_eq!(&dst[..2], b"lo");
        assert_eq!(window.pop(), None);
    }

    #[test]
    fn test_find_is_relative_to_read_cursor() {
        let mut window = Window::with_capacity(8);
        let mut src = Cursor::new(&b"a\nb\nc"[..]);
        window.fill_from(&mut src).unwrap();

        assert_eq!(window.find(b'\n', usize::MAX), Some(1));
        window.consume(2);
        assert_eq!(window.find(b'\n', usize::MAX), Some(1));
        window.consume(2);
        assert_eq!(window.find(b'\n', usize::MAX), None);
    }

    #[test]
    fn test_find_respects_max() {
        let mut window = Window::with_capacity(8);
        let mut src = Cursor::new(&b"abc\n"[..]);
        window.fill_from(&mut src).unwrap();

        assert_eq!(window.find(b'\n', 3), None);
        assert_eq!(window.find(b'\n', 4), Some(3));
    }

    #[test]
    fn test_consume_clamps() {
        let mut window = Window::with_capacity(8);
        let mut src = Cursor::new(&b"abc"[..]);
        window.fill_from(&mut src).unwrap();
        window.consume(100);
        assert!(window.is_empty());
    }

    /// Claims one byte more than it was handed.
    struct Overreport;

    impl Read for Overreport {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            buf.fill(b'x');
            Ok(buf.len() + 1)
        }
    }

    #[test]
    fn test_overreported_count_is_an_error() {
        let mut window = Window::with_capacity(4);
        let err = window.fill_from(&mut Overreport).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(window.is_empty());
        assert_eq!(window.prepare_fill().map(|t| t.len()), Some(4));
    }

    #[test]
    fn test_commit_zero_is_eof() {
        let mut window = Window::with_capacity(4);
        assert_eq!(window.commit(0).unwrap(), Fill::Eof);
        assert_eq!(window.commit(2).unwrap(), Fill::Filled(2));
        assert!(window.commit(3).is_err());
        assert_eq!(window.buffered(), 2);
    }

    #[test]
    fn test_prepare_fill_reclaims_consumed() {
        let mut window = Window::with_capacity(8);
        let mut src = Cursor::new(&b"abc"[..]);
        window.fill_from(&mut src).unwrap();
        window.consume(3);
        assert_eq!(window.prepare_fill().map(|t| t.len()), Some(8));
    }
}
