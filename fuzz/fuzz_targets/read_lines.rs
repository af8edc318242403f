#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use rbuf::{ReadError, Reader, ReaderConfig};

fuzz_target!(|input: (u8, u8, Vec<u8>)| {
    let (capacity, limit, data) = input;

    // Unbounded: lines concatenate back to the input
    let reader = Reader::with_capacity(Cursor::new(&data), capacity as usize);
    let mut joined = Vec::new();
    let mut lines = 0;
    for line in reader.split(b'\n') {
        let line = line.unwrap();
        joined.extend_from_slice(&line.data);
        lines += 1;
    }
    assert_eq!(joined, data);
    assert_eq!(
        lines,
        data.split_inclusive(|&b| b == b'\n').count()
    );

    // Bounded: no line longer than the limit, rejected bytes counted exactly
    if limit == 0 {
        return;
    }
    let config = ReaderConfig::new(capacity as usize).with_max_line_len(limit as usize);
    let mut reader = Reader::with_config(Cursor::new(&data), config).unwrap();
    let mut joined = Vec::new();
    loop {
        let mut out = Vec::new();
        match reader.read_string_into(b'\n', &mut out) {
            Ok(complete) => {
                assert!(out.len() <= limit as usize);
                joined.extend_from_slice(&out);
                if !complete {
                    break;
                }
            }
            Err(ReadError::LineTooLong { limit: l }) => {
                assert_eq!(out.len(), l);
                joined.extend_from_slice(&out);
            }
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(joined, data);
});
