//! rbuf
//!
//! Fixed-capacity buffered reading for Rust.
//!
//! `rbuf` sits between a raw, unbuffered byte source (a file, socket or pipe)
//! and a consumer that wants cheap small reads, single-byte reads and
//! delimiter-terminated reads. It batches source reads into one fixed window
//! and serves requests from memory until the window runs dry.
//!
//! The crate intentionally:
//! - does NOT open or close the source
//! - does NOT retry failed source reads
//! - does NOT buffer writes
//! - does NOT decode the bytes it returns
//!
//! It only does one thing: **Source bytes → fewer, larger reads**
//!
//! End-of-stream and transport failure stay distinct everywhere: a clean end
//! is `Ok(0)`, `Ok(None)` or an incomplete [`Line`]; a failure is always
//! [`ReadError::Io`].
//!
//! # Sync
//!
//! ```no_run
//! use std::net::TcpStream;
//! use rbuf::{Reader, ReadError};
//!
//! fn main() -> Result<(), ReadError> {
//!     let stream = TcpStream::connect("127.0.0.1:6379")?;
//!     let mut reader = Reader::new(&stream);
//!
//!     while let Some(kind) = reader.read_byte()? {
//!         let line = reader.read_string(b'\n')?;
//!         println!("{} {}", kind as char, line);
//!         if !line.is_complete() {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
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
//!         println!("line {}", line.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod line;
mod reader;

mod buffer; // internal fixed window

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_CAPACITY, ReaderConfig};
pub use error::ReadError;
pub use line::Line;
pub use reader::{Reader, Split};

#[cfg(feature = "async-io")]
pub use async_stream::{AsyncReader, SplitStream, split_async};
