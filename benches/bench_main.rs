use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lzmin::{compress, decompress};
use std::hint::black_box;

/// Generates pseudo-random bytes using a deterministic Linear Congruential Generator (LCG).
///
/// High entropy means almost every cursor falls through the whole window scan,
/// which is the matcher's worst case.
fn generate_random(size: usize) -> Vec<u8> {
    let mut vec = Vec::with_capacity(size);
    let mut seed: u64 = 0xDEAD_BEEF;
    for _ in 0..size {
        seed = (seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)) & 0xFFFF_FFFF;
        vec.push((seed >> 24) as u8);
    }
    vec
}

/// Generates repeated standard text sentences, truncated to `size`.
fn generate_text(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. ";
    let mut vec = Vec::with_capacity(size);
    while vec.len() < size {
        vec.extend_from_slice(text);
    }
    vec.truncate(size);
    vec
}

/// Generates a buffer of zeroes: every match reaches the maximum length immediately.
fn generate_zeroes(size: usize) -> Vec<u8> {
    vec![0u8; size]
}

/// Benchmarks compression against various data patterns.
///
/// The linear window scan makes random data far slower than the other two,
/// so the size is kept small enough for it to finish in reasonable time.
fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzmin Compression");
    group.sample_size(10);

    let size = 16 * 1024;

    let scenarios = [
        ("Zeroes", generate_zeroes(size)),
        ("Random", generate_random(size)),
        ("Text", generate_text(size)),
    ];

    for (name, input_data) in &scenarios {
        let bench_name = format!("{name} 16KB");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(&bench_name, |b| {
            let mut output = Vec::with_capacity(size);
            b.iter(|| {
                output.clear();
                compress(black_box(input_data), black_box(&mut output)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmarks decompression. Throughput is measured against the uncompressed size.
fn bench_decompression(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzmin Decompression");
    let size = 16 * 1024;

    let scenarios = [
        ("Zeroes", generate_zeroes(size)),
        ("Random", generate_random(size)),
        ("Text", generate_text(size)),
    ];

    for (name, source_data) in &scenarios {
        let mut compressed_data = Vec::new();
        compress(source_data, &mut compressed_data).unwrap();

        let bench_name = format!("{name} 16KB");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(&bench_name, |b| {
            let mut output = Vec::with_capacity(size);
            b.iter(|| {
                output.clear();
                decompress(black_box(&compressed_data), black_box(&mut output)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compression, bench_decompression);
criterion_main!(benches);
