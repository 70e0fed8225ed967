// benches/buffer_bench.rs
use boundbuf::prelude::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_append_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_modes");
    let chunk = [0x5Au8; 100];

    for mode in [OverflowMode::Truncate, OverflowMode::Skip, OverflowMode::Ring] {
        group.bench_with_input(BenchmarkId::new("append_bytes", mode), &mode, |b, &mode| {
            let mut buf = ByteBuffer::init_new(mode, 4096);
            b.iter(|| {
                buf.clear();
                for _ in 0..64 {
                    buf.append_bytes(black_box(&chunk));
                }
            });
        });
    }

    group.finish();
}

fn bench_append_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_byte");

    for size in [256, 1024, 4096].iter() {
        group.bench_with_input(BenchmarkId::new("ring", size), size, |b, &size| {
            let mut buf = ByteBuffer::init_new(OverflowMode::Ring, size);
            b.iter(|| {
                for i in 0..1024u32 {
                    buf.append_byte(black_box(i as u8));
                }
            });
        });
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [256, 1024, 4096, 16384].iter() {
        group.bench_with_input(BenchmarkId::new("insert_middle", size), size, |b, &size| {
            let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, size);
            buf.fill_complete(b'A');
            b.iter(|| {
                buf.insert_bytes(black_box(size / 2), black_box(b"inserted"));
            });
        });

        group.bench_with_input(BenchmarkId::new("prepend", size), size, |b, &size| {
            let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, size);
            b.iter(|| {
                buf.prepend_byte(black_box(0x42));
            });
        });
    }

    group.finish();
}

fn bench_scratch_pool_vs_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("scratch_comparison");
    let tail = vec![0u8; 1024];

    group.bench_function("with_pool", |b| {
        let pool = ScratchPool::new(ScratchConfig {
            buffer_size: 1024,
            max_pool_size: 16,
            min_pool_size: 4,
        });

        b.iter(|| {
            let mut scratch = pool.acquire();
            scratch.extend_from_slice(black_box(&tail));
        });
    });

    group.bench_function("direct_alloc", |b| {
        b.iter(|| {
            let mut scratch = Vec::with_capacity(1024);
            scratch.extend_from_slice(black_box(&tail));
            black_box(&scratch);
        });
    });

    group.finish();
}

fn bench_formatted(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatted");

    group.bench_function("append_fmt", |b| {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 1024);
        b.iter(|| {
            boundbuf::append_fmt!(buf, "[{:.3}] {}", black_box(47.222f32), black_box("msg")).unwrap();
        });
    });

    group.finish();
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    for size in [256, 4096, 65536].iter() {
        group.bench_with_input(BenchmarkId::new("join_buffer", size), size, |b, &size| {
            let mut left = ByteBuffer::init_new(OverflowMode::Truncate, size);
            left.fill_complete(b'A');
            let mut right = ByteBuffer::init_new(OverflowMode::Truncate, size);
            right.fill_complete(b'B');

            b.iter(|| black_box(join_buffer(&left, &right, OverflowMode::Truncate)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_append_modes,
    bench_append_byte,
    bench_insert,
    bench_scratch_pool_vs_direct,
    bench_formatted,
    bench_join
);

criterion_main!(benches);
