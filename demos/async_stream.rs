//! Async line stream example.
//!
//! Feeds a slice through `split_async` and collects the lines. Any
//! `futures_io::AsyncRead` works the same way.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use futures_util::StreamExt;
use rbuf::split_async;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\ntrailing";

    let mut lines = split_async(data, b'\n');
    let mut count = 0;

    while let Some(line) = lines.next().await {
        let line = line?;
        count += 1;
        println!(
            "{:>2}: {:?}{}",
            count,
            String::from_utf8_lossy(line.content(b'\n')),
            if line.is_complete() { "" } else { " (no delimiter)" }
        );
    }

    println!("\n{} lines", count);
    Ok(())
}
