/*!
 * Pipe Benchmarks
 *
 * Throughput and wake latency for blocking byte pipe operations
 */

use bytepipe::{Pipe, Timeout};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;

fn bench_uncontended_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended_roundtrip");

    for size in [64usize, 1024, 16384] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let pipe = Pipe::new(size);
            let src = vec![0xabu8; size];
            let mut dst = vec![0u8; size];

            b.iter(|| {
                pipe.write(black_box(&src), Timeout::NoWait).unwrap();
                pipe.read(black_box(&mut dst), Timeout::NoWait).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_blocked_reader_wake(c: &mut Criterion) {
    c.bench_function("blocked_reader_wake", |b| {
        b.iter(|| {
            let pipe = Arc::new(Pipe::new(8));
            let pipe_clone = pipe.clone();

            let reader = thread::spawn(move || {
                let mut buf = [0u8; 1];
                pipe_clone.read(&mut buf, Timeout::Forever)
            });

            pipe.write(b"x", Timeout::Forever).unwrap();
            reader.join().unwrap().unwrap();
        });
    });
}

fn bench_cross_thread_stream(c: &mut Criterion) {
    const TOTAL: usize = 64 * 1024;
    const CHUNK: usize = 4096;

    let mut group = c.benchmark_group("cross_thread_stream");
    group.throughput(Throughput::Bytes(TOTAL as u64));
    group.bench_function("64k_through_4k_pipe", |b| {
        b.iter(|| {
            let pipe = Arc::new(Pipe::new(CHUNK));
            let pipe_clone = pipe.clone();

            let writer = thread::spawn(move || {
                let chunk = [0x5au8; CHUNK];
                let mut sent = 0;
                while sent < TOTAL {
                    sent += pipe_clone.write(&chunk, Timeout::Forever).unwrap();
                }
            });

            let mut buf = [0u8; CHUNK];
            let mut received = 0;
            while received < TOTAL {
                received += pipe.read(&mut buf, Timeout::Forever).unwrap();
            }

            writer.join().unwrap();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_uncontended_roundtrip,
    bench_blocked_reader_wake,
    bench_cross_thread_stream
);
criterion_main!(benches);
