//! Basic synchronous reading: bytes, lines and bounded reads.
//!
//! Parses a few RESP-style replies from an in-memory source with a tiny
//! window, so every operation has to refill at least once.
//!
//! Run with:
//!     cargo run --example sync_basic

use std::io::Cursor;

use rbuf::{ReadError, Reader};

fn main() -> Result<(), ReadError> {
    let data = b"+PONG\r\n:42\r\n$5\r\nhello\r\n-ERR unknown\r\n".to_vec();

    // 8-byte window: small enough to show refills and compaction
    let mut reader = Reader::with_capacity(Cursor::new(data), 8);

    println!("Reading replies through a {} byte window\n", reader.capacity());

    while let Some(kind) = reader.read_byte()? {
        let header = reader.read_string(b'\n')?;
        let text = String::from_utf8_lossy(header.content(b'\n')).trim_end().to_string();

        match kind {
            b'+' => println!("status  {}", text),
            b':' => println!("integer {}", text),
            b'-' => println!("error   {}", text),
            b'$' => {
                let len: usize = text.parse().unwrap_or(0);
                let mut body = vec![0u8; len + 2];
                reader.read_exact(&mut body)?;
                println!("bulk    {:?}", String::from_utf8_lossy(&body[..len]));
            }
            other => println!("unknown type byte {:?}", other as char),
        }

        println!("        ({} bytes still buffered)", reader.buffered());
    }

    // End-of-stream is sticky: every operation keeps reporting it
    let mut buf = [0u8; 4];
    println!("\nread after end: {} bytes", reader.read(&mut buf)?);
    println!("line after end: {}", reader.read_string(b'\n')?);

    Ok(())
}
