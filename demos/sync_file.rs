//! Line statistics over a file.
//!
//! Usage:
//!     cargo run --example sync_file -- <path> [capacity]

use std::env;
use std::fs::File;

use rbuf::{Reader, ReaderConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: sync_file <path> [capacity]")?;
    let capacity = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(0);

    let file = File::open(&path)?;
    let config = ReaderConfig::new(capacity);
    let reader = Reader::with_config(&file, config)?;

    println!("File: {} (window {} bytes)\n", path, reader.capacity());

    let mut lines = 0;
    let mut bytes = 0;
    let mut longest = 0;
    let mut unterminated = false;

    for line in reader.split(b'\n') {
        let line = line?;
        lines += 1;
        bytes += line.len();
        longest = longest.max(line.content(b'\n').len());
        unterminated = !line.is_complete();
    }

    println!("Lines:        {}", lines);
    println!("Bytes:        {}", bytes);
    println!("Longest line: {} bytes", longest);
    if unterminated {
        println!("Last line has no trailing newline");
    }

    Ok(())
}
