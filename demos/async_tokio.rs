//! Async reading from a tokio file.
//!
//! Tokio sources are converted to `futures_io::AsyncRead` with
//! `tokio_util::compat`, then wrapped in an [`AsyncReader`].
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- <path>

use rbuf::{AsyncReader, ReaderConfig};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: async_tokio <path>")?;

    let file = tokio::fs::File::open(&path).await?;
    let config = ReaderConfig::new(16 * 1024).with_max_line_len(1024 * 1024);
    let mut reader = AsyncReader::with_config(file.compat(), config)?;

    println!("File: {} (window {} bytes)\n", path, reader.capacity());

    let mut lines = 0;
    let mut out = Vec::new();
    loop {
        out.clear();
        let complete = reader.read_string_into(b'\n', &mut out).await?;
        if out.is_empty() {
            break;
        }
        lines += 1;
        if lines <= 5 {
            println!("{:>2}: {}", lines, String::from_utf8_lossy(&out).trim_end());
        }
        if !complete {
            break;
        }
    }

    println!("\n{} lines total", lines);
    Ok(())
}
