//! Buffered reader over `futures_io::AsyncRead`.
//!
//! Same window, same refill policy and same error mapping as the blocking
//! [`Reader`](crate::Reader). Only the source call changes: a pending source
//! suspends the task instead of blocking the thread, and the reader picks up
//! exactly where it left off on the next poll.

use std::future::poll_fn;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::Bytes;
use futures_io::{AsyncBufRead, AsyncRead};
use pin_project_lite::pin_project;

use crate::buffer::{Fill, Window};
use crate::config::ReaderConfig;
use crate::error::ReadError;
use crate::line::{Line, Scan};

use super::SplitStream;

pin_project! {
    /// A buffered reader over an async byte source.
    ///
    /// Runtime-agnostic: works with any `futures_io::AsyncRead`. For tokio
    /// sources, convert with `tokio_util::compat`.
    ///
    /// Method-call syntax always picks the inherent `read` and `read_exact`,
    /// which return [`ReadError`], even with `futures_util::AsyncReadExt` in
    /// scope. Use `AsyncReadExt::read(&mut reader, buf)` for the
    /// `io::Result` versions.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use rbuf::AsyncReader;
    /// use futures_io::AsyncRead;
    ///
    /// async fn first_line<R: AsyncRead + Unpin>(src: R) -> Result<(), rbuf::ReadError> {
    ///     let mut reader = AsyncReader::new(src);
    ///     let line = reader.read_string(b'\n').await?;
    ///     println!("{} ({})", line, line.is_complete());
    ///     Ok(())
    /// }
    /// ```
    #[derive(Debug)]
    pub struct AsyncReader<R> {
        #[pin]
        source: R,
        window: Window,
        config: ReaderConfig,
    }
}

impl<R> AsyncReader<R> {
    /// Creates a reader with a [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY)
    /// window.
    pub fn new(source: R) -> Self {
        Self::from_parts(source, ReaderConfig::default())
    }

    /// Creates a reader with a window of `capacity` bytes (`0` means default).
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

    /// Returns the number of bytes servable without polling the source.
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
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Gets a pinned mutable reference to the source.
    pub fn get_pin_mut(self: Pin<&mut Self>) -> Pin<&mut R> {
        self.project().source
    }

    /// Returns the source. Unread buffered bytes are dropped.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Turns this reader into a stream of `delim`-terminated lines.
    pub fn split(self, delim: u8) -> SplitStream<R> {
        SplitStream::new(self, delim)
    }
}

impl<R: AsyncRead> AsyncReader<R> {
    /// One source poll into the window's free tail.
    fn poll_fill(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<Fill, ReadError>> {
        let this = self.project();
        let Some(tail) = this.window.prepare_fill() else {
            return Poll::Ready(Ok(Fill::Full));
        };
        let requested = tail.len();

        let n = ready!(this.source.poll_read(cx, tail)).map_err(ReadError::from_source)?;
        log::trace!("refill: requested {} bytes, source produced {}", requested, n);

        let fill = this.window.commit(n).map_err(ReadError::from_source)?;
        if fill == Fill::Eof {
            log::debug!("source reached end-of-stream");
        }
        Poll::Ready(Ok(fill))
    }

    /// Polls a bounded read into `dst`.
    ///
    /// See [`Reader::read`](crate::Reader::read); a request at least as large
    /// as the window goes straight to the source when nothing is buffered.
    pub fn poll_read_bounded(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        dst: &mut [u8],
    ) -> Poll<Result<usize, ReadError>> {
        if dst.is_empty() {
            return Poll::Ready(Ok(0));
        }

        if self.window.is_empty() {
            if dst.len() >= self.window.capacity() {
                log::debug!("bypass: {} byte read goes straight to source", dst.len());
                return self
                    .project()
                    .source
                    .poll_read(cx, dst)
                    .map_err(ReadError::from_source);
            }
            if ready!(self.as_mut().poll_fill(cx))? == Fill::Eof {
                return Poll::Ready(Ok(0));
            }
        }

        Poll::Ready(Ok(self.project().window.copy_to(dst)))
    }

    /// Polls for a single byte; `None` at end-of-stream.
    pub fn poll_read_byte(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<u8>, ReadError>> {
        if self.window.is_empty() {
            ready!(self.as_mut().poll_fill(cx))?;
        }
        Poll::Ready(Ok(self.project().window.pop()))
    }

    /// Polls a delimiter scan. Bytes accumulated so far live in `scan` and
    /// `out`, so a `Pending` loses nothing.
    pub(crate) fn poll_read_line(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        scan: &mut Scan,
        out: &mut Vec<u8>,
    ) -> Poll<Result<bool, ReadError>> {
        loop {
            if scan.advance(self.as_mut().project().window, out)? {
                return Poll::Ready(Ok(true));
            }
            match ready!(self.as_mut().poll_fill(cx))? {
                Fill::Filled(_) => {}
                Fill::Eof | Fill::Full => return Poll::Ready(Ok(false)),
            }
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncReader<R> {
    /// Reads up to `dst.len()` bytes. See [`Reader::read`](crate::Reader::read).
    pub async fn read(&mut self, dst: &mut [u8]) -> Result<usize, ReadError> {
        poll_fn(|cx| Pin::new(&mut *self).poll_read_bounded(cx, dst)).await
    }

    /// Reads a single byte. See [`Reader::read_byte`](crate::Reader::read_byte).
    pub async fn read_byte(&mut self) -> Result<Option<u8>, ReadError> {
        poll_fn(|cx| Pin::new(&mut *self).poll_read_byte(cx)).await
    }

    /// Reads up to and including `delim`. See
    /// [`Reader::read_string`](crate::Reader::read_string).
    pub async fn read_string(&mut self, delim: u8) -> Result<Line, ReadError> {
        let mut out = Vec::new();
        let complete = self.read_string_into(delim, &mut out).await?;
        Ok(Line {
            data: Bytes::from(out),
            complete,
        })
    }

    /// Appends bytes up to and including `delim` to `out`. See
    /// [`Reader::read_string_into`](crate::Reader::read_string_into).
    pub async fn read_string_into(
        &mut self,
        delim: u8,
        out: &mut Vec<u8>,
    ) -> Result<bool, ReadError> {
        let mut scan = Scan::new(delim, self.config.max_line_len());
        poll_fn(|cx| Pin::new(&mut *self).poll_read_line(cx, &mut scan, out)).await
    }

    /// Fills `dst` completely. See [`Reader::read_exact`](crate::Reader::read_exact).
    pub async fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), ReadError> {
        let mut filled = 0;
        while filled < dst.len() {
            match self.read(&mut dst[filled..]).await? {
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
}

impl<R: AsyncRead> AsyncRead for AsyncReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        self.poll_read_bounded(cx, buf).map_err(io::Error::from)
    }
}

impl<R: AsyncRead> AsyncBufRead for AsyncReader<R> {
    fn poll_fill_buf(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        if self.window.is_empty() {
            ready!(self.as_mut().poll_fill(cx))?;
        }
        let this = self.project();
        Poll::Ready(Ok(this.window.unread()))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.project().window.consume(amt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_async_read_byte() {
        let src: &[u8] = b"AB";
        let mut reader = AsyncReader::with_capacity(src, 1);

        assert_eq!(reader.read_byte().await.unwrap(), Some(b'A'));
        assert_eq!(reader.read_byte().await.unwrap(), Some(b'B'));
        assert_eq!(reader.read_byte().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_async_read_string() {
        let src: &[u8] = b"foo\nbar";
        let mut reader = AsyncReader::with_capacity(src, 2);

        let line = reader.read_string(b'\n').await.unwrap();
        assert_eq!(line, Line::complete(&b"foo\n"[..]));

        let line = reader.read_string(b'\n').await.unwrap();
        assert_eq!(line, Line::partial(&b"bar"[..]));
    }

    #[tokio::test]
    async fn test_async_read_bounded() {
        let src: &[u8] = b"hello world";
        let mut reader = AsyncReader::with_capacity(src, 8);
        let mut buf = [0u8; 3];

        assert_eq!(reader.read(&mut buf).await.unwrap(), 3);
        assert_eq!(&buf, b"hel");
        assert_eq!(reader.buffered(), 5);

        assert_eq!(reader.read(&mut []).await.unwrap(), 0);
        assert_eq!(reader.buffered(), 5);
    }

    #[tokio::test]
    async fn test_async_read_exact() {
        let src: &[u8] = b"$3\r\nabc";
        let mut reader = AsyncReader::with_capacity(src, 2);
        let mut buf = [0u8; 7];
        reader.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"$3\r\nabc");

        let mut more = [0u8; 1];
        assert!(reader.read_exact(&mut more).await.is_err());
    }

    #[tokio::test]
    async fn test_async_buf_read_impl() {
        use futures_util::AsyncBufReadExt;

        let src: &[u8] = b"one\ntwo\n";
        let mut reader = AsyncReader::with_capacity(src, 3);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        assert_eq!(line, "one\n");
    }
}
