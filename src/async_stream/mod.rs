//! Async buffered reading.
//!
//! The buffered reader over `futures-io::AsyncRead`. Runtime-agnostic; tokio
//! sources go through `tokio_util::compat`.
//!
//! - [`AsyncReader`] - Fixed-window buffered reader for async sources
//! - [`split_async`] - Creates an async stream of lines from an async source
//!
//! This module requires the `async-io` feature to be enabled.

mod reader;
mod stream;

pub use reader::AsyncReader;
pub use stream::{SplitStream, split_async};
