//! Benchmarks for rbuf.
//!
//! Run with:
//!     cargo bench

use std::hint::black_box;
use std::io::{Cursor, Read};

use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use rbuf::Reader;

fn bench_read_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_byte");
    let size = 1024 * 1024; // 1 MB
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    for capacity in [64, 4 * 1024, 64 * 1024] {
        group.bench_function(format!("capacity_{}", capacity), |b| {
            b.iter(|| {
                let mut reader = Reader::with_capacity(Cursor::new(black_box(&data)), capacity);
                let mut sum = 0u64;
                while let Some(byte) = reader.read_byte().unwrap() {
                    sum += byte as u64;
                }
                black_box(sum)
            });
        });
    }

    // Baseline: one source call per byte
    group.bench_function("unbuffered", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(&data));
            let mut byte = [0u8; 1];
            let mut sum = 0u64;
            while cursor.read(&mut byte).unwrap() == 1 {
                sum += byte[0] as u64;
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn bench_read_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_string");

    // RESP-like traffic: many short CRLF lines
    let line = b"$11\r\nhello world\r\n";
    let data: Vec<u8> = line.iter().copied().cycle().take(line.len() * 50_000).collect();

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("short_lines", |b| {
        b.iter(|| {
            let mut reader = Reader::new(Cursor::new(black_box(&data)));
            let mut count = 0usize;
            loop {
                let line = reader.read_string(b'\n').unwrap();
                if !line.is_complete() {
                    break;
                }
                count += 1;
            }
            black_box(count)
        });
    });

    // One line far larger than the window
    let long: Vec<u8> = std::iter::repeat_n(b'x', 1024 * 1024)
        .chain(std::iter::once(b'\n'))
        .collect();
    group.bench_function("long_line", |b| {
        b.iter(|| {
            let mut reader = Reader::new(Cursor::new(black_box(&long)));
            black_box(reader.read_string(b'\n').unwrap().len())
        });
    });

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let size = 1024 * 1024; // 1 MB
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    for request in [16, 512, 64 * 1024] {
        group.bench_function(format!("request_{}", request), |b| {
            b.iter(|| {
                let mut reader = Reader::new(Cursor::new(black_box(&data)));
                let mut buf = vec![0u8; request];
                let mut total = 0usize;
                loop {
                    let n = reader.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    total += n;
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_read_byte, bench_read_string, bench_read);
criterion_main!(benches);
