use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sseframe::{FrameConfig, FrameDecoder};

use crate::{
    consts::{generate_chat_stream, load_chunks},
    frames::{run_frame_stream, run_frames, run_read_blocking, run_read_stream},
};

pub(crate) mod consts;

const EVENTS: usize = 512;

/// Raw decoder cost with the whole stream already buffered
fn bench_decoder(c: &mut Criterion) {
    let data = generate_chat_stream(EVENTS);
    let config = FrameConfig::new("\n\n", data.len(), data.len()).unwrap();

    let mut group = c.benchmark_group("decoder");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("decode_all", |b| {
        b.iter(|| {
            let mut decoder = FrameDecoder::new(&config);
            decoder.feed(black_box(&data));
            while let Some(frame) = decoder.decode().unwrap() {
                black_box(frame);
            }
        });
    });
    group.finish();
}

/// Splitting with differently sized reads, small reads keep events straddling chunks
fn bench_splitters(c: &mut Criterion) {
    let data = generate_chat_stream(EVENTS);

    let mut group = c.benchmark_group("splitters");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for step in [7, 64, 512, 4096] {
        group.bench_with_input(BenchmarkId::new("frames", step), &step, |b, &step| {
            b.iter(|| assert_eq!(run_frames(&data, step), EVENTS + 1));
        });

        let chunks = load_chunks(&data, step);
        group.bench_with_input(
            BenchmarkId::new("frame_stream", step),
            &chunks,
            |b, chunks| {
                b.iter(|| assert_eq!(run_frame_stream(chunks), EVENTS + 1));
            },
        );
    }

    group.finish();
}

/// End to end through the background producer and the channel
fn bench_pumps(c: &mut Criterion) {
    let data = generate_chat_stream(EVENTS);
    let chunks = load_chunks(&data, 128);

    let mut group = c.benchmark_group("pumps");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("read_stream", |b| {
        b.iter(|| assert_eq!(run_read_stream(&chunks), EVENTS));
    });
    group.bench_function("read_blocking", |b| {
        b.iter(|| assert_eq!(run_read_blocking(&data), EVENTS));
    });
    group.finish();
}

criterion_group!(benches, bench_decoder, bench_splitters, bench_pumps);
criterion_main!(benches);
