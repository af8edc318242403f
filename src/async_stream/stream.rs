//! Async stream adapter for delimiter reads.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rbuf::split_async;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rbuf::ReadError> {
//!     let mut lines = split_async(reader, b'\n');
//!
//!     while let Some(line) = lines.next().await {
//!         let line = line?;
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::error::ReadError;
use crate::line::{Line, Scan};

use super::AsyncReader;

pin_project! {
    /// A stream that yields lines from an [`AsyncReader`].
    ///
    /// Every item but the last is a complete [`Line`]. The last one is
    /// partial when the source ends without a trailing delimiter; an empty
    /// tail is not yielded. The stream ends after the first error.
    ///
    /// Bytes of a line that spans several source polls are held here between
    /// polls, so dropping the stream mid-line drops them too.
    #[derive(Debug)]
    pub struct SplitStream<R> {
        #[pin]
        reader: AsyncReader<R>,
        delim: u8,
        scan: Scan,
        pending: Vec<u8>,
        finished: bool,
    }
}

impl<R> SplitStream<R> {
    pub(crate) fn new(reader: AsyncReader<R>, delim: u8) -> Self {
        let scan = Scan::new(delim, reader.config().max_line_len());
        Self {
            reader,
            delim,
            scan,
            pending: Vec::new(),
            finished: false,
        }
    }

    /// Returns the delimiter this stream splits on.
    pub fn delimiter(&self) -> u8 {
        self.delim
    }

    /// Returns the underlying reader.
    ///
    /// Bytes of a partially scanned line are dropped.
    pub fn into_inner(self) -> AsyncReader<R> {
        self.reader
    }
}

impl<R: AsyncRead> Stream for SplitStream<R> {
    type Item = Result<Line, ReadError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        let result = ready!(this.reader.poll_read_line(cx, this.scan, this.pending));
        this.scan.reset();

        match result {
            Ok(complete) => {
                let data = Bytes::from(mem::take(this.pending));
                if complete {
                    return Poll::Ready(Some(Ok(Line::complete(data))));
                }
                *this.finished = true;
                if data.is_empty() {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Ok(Line::partial(data))))
                }
            }
            Err(e) => {
                *this.finished = true;
                Poll::Ready(Some(Err(e)))
            }
        }
    }
}

/// Creates a line stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O, with a
/// [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) window. For other settings
/// build an [`AsyncReader`] and call [`AsyncReader::split`].
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use rbuf::split_async;
///
/// let stream = tokio::net::TcpStream::connect("127.0.0.1:6379").await?;
/// let lines = split_async(stream.compat(), b'\n');
/// ```
pub fn split_async<R: AsyncRead>(reader: R, delim: u8) -> SplitStream<R> {
    AsyncReader::new(reader).split(delim)
}
