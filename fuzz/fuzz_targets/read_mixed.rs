#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use rbuf::Reader;

/// Serves `data` in pieces whose sizes come from `cuts`.
struct Chunked<'a> {
    data: &'a [u8],
    cuts: &'a [u8],
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (&cut, rest) = self.cuts.split_first().unwrap_or((&255, &[]));
        self.cuts = rest;
        let n = (cut as usize + 1).min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: (u8, Vec<u8>, Vec<u8>, Vec<u8>)| {
    let (capacity, data, cuts, ops) = input;

    let source = Chunked {
        data: &data,
        cuts: &cuts,
    };
    let mut reader = Reader::with_capacity(source, capacity as usize);
    let mut out = Vec::new();

    // Each op byte picks an operation; the stream must come back whole
    for op in ops.iter().copied().cycle().take(data.len() * 2 + 16) {
        let done = match op % 3 {
            0 => match reader.read_byte().unwrap() {
                Some(b) => {
                    out.push(b);
                    false
                }
                None => true,
            },
            1 => {
                let line = reader.read_string(op).unwrap();
                out.extend_from_slice(&line.data);
                // Verify: a complete line ends with its delimiter
                assert!(!line.is_complete() || line.data.last() == Some(&op));
                !line.is_complete()
            }
            _ => {
                let mut buf = vec![0u8; op as usize];
                let n = reader.read(&mut buf).unwrap();
                out.extend_from_slice(&buf[..n]);
                n == 0 && !buf.is_empty()
            }
        };

        // Verify: buffered bytes never exceed the window
        assert!(reader.buffered() <= reader.capacity());

        if done {
            break;
        }
    }

    // Drain whatever the op sequence left behind
    loop {
        let mut buf = [0u8; 64];
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }

    // Verify: no loss, no duplication
    assert_eq!(out, data);
});
