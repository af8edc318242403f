//! Resumable delimiter scan over a [`Window`].
//!
//! The scan state lives outside the window so the async reader can park it
//! across `Poll::Pending` without losing accumulated bytes.

use crate::buffer::Window;
use crate::error::ReadError;

/// Progress of one delimiter read.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scan {
    delim: u8,
    limit: Option<usize>,
    taken: usize,
}

impl Scan {
    pub(crate) fn new(delim: u8, limit: Option<usize>) -> Self {
        Self {
            delim,
            limit,
            taken: 0,
        }
    }

    /// Starts over for the next line.
    pub(crate) fn reset(&mut self) {
        self.taken = 0;
    }

    /// Moves unread bytes from `window` into `out`, up to and including the
    /// delimiter.
    ///
    /// Returns `Ok(true)` once the delimiter has been moved, `Ok(false)` when
    /// the window ran dry first and needs a refill.
    ///
    /// # Errors
    ///
    /// [`ReadError::LineTooLong`] once `limit` bytes were moved without a
    /// delimiter. Those bytes stay in `out`.
    pub(crate) fn advance(
        &mut self,
        window: &mut Window,
        out: &mut Vec<u8>,
    ) -> Result<bool, ReadError> {
        let budget = self.limit.map_or(usize::MAX, |limit| limit - self.taken);

        if let Some(i) = window.find(self.delim, budget) {
            out.extend_from_slice(&window.unread()[..=i]);
            window.consume(i + 1);
            self.taken += i + 1;
            return Ok(true);
        }

        let n = window.buffered().min(budget);
        out.extend_from_slice(&window.unread()[..n]);
        window.consume(n);
        self.taken += n;

        match self.limit {
            Some(limit) if self.taken >= limit => Err(ReadError::LineTooLong { limit }),
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn window_with(data: &[u8]) -> Window {
        let mut window = Window::with_capacity(16);
        window.fill_from(&mut Cursor::new(data)).unwrap();
        window
    }

    #[test]
    fn test_scan_finds_delimiter() {
        let mut window = window_with(b"foo\nbar");
        let mut out = Vec::new();

        assert!(
            Scan::new(b'\n', None)
                .advance(&mut window, &mut out)
                .unwrap()
        );
        assert_eq!(out, b"foo\n");
        assert_eq!(window.unread(), b"bar");
    }

    #[test]
    fn test_scan_drains_when_missing() {
        let mut window = window_with(b"bar");
        let mut out = Vec::new();

        assert!(
            !Scan::new(b'\n', None)
                .advance(&mut window, &mut out)
                .unwrap()
        );
        assert_eq!(out, b"bar");
        assert!(window.is_empty());
    }

    #[test]
    fn test_scan_limit_counts_across_calls() {
        let mut scan = Scan::new(b'\n', Some(5));
        let mut out = Vec::new();

        let mut window = window_with(b"abc");
        assert!(!scan.advance(&mut window, &mut out).unwrap());

        let mut window = window_with(b"defgh\n");
        let err = scan.advance(&mut window, &mut out).unwrap_err();
        assert!(matches!(err, ReadError::LineTooLong { limit: 5 }));
        assert_eq!(out, b"abcde");
        assert_eq!(window.unread(), b"fgh\n");
    }

    #[test]
    fn test_scan_delimiter_at_limit() {
        let mut window = window_with(b"abcd\n");
        let mut out = Vec::new();

        assert!(
            Scan::new(b'\n', Some(5))
                .advance(&mut window, &mut out)
                .unwrap()
        );
        assert_eq!(out, b"abcd\n");
    }
}
