//! Benchmarks for token encoding and validation

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hs_token::{Claims, Decoder, Encoder};

const SECRET: &[u8] = b"benchmark-secret-0123456789abcdef";

fn claims_of_size(n: usize) -> Claims {
    (0..n)
        .map(|i| (format!("claim_{i}"), format!("value-{i}")))
        .collect()
}

/// Encode and decode with growing claim sets
fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_codec");
    let encoder = Encoder::new().with_lifetime_secs(3600);
    let decoder = Decoder::new();

    for size in [0usize, 8, 64] {
        let claims = claims_of_size(size);
        let token = encoder.encode(SECRET, &claims).unwrap();
        group.throughput(Throughput::Bytes(token.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &claims, |b, claims| {
            b.iter(|| std::hint::black_box(encoder.encode(SECRET, claims).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("decode", size), &token, |b, token| {
            b.iter(|| std::hint::black_box(decoder.decode(token, SECRET).unwrap()));
        });
    }
    group.finish();
}

/// Rejections should cost no more than a valid decode
fn benchmark_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_rejection");
    let token = Encoder::new().encode(SECRET, &claims_of_size(8)).unwrap();
    let decoder = Decoder::new();

    group.bench_function("wrong_secret", |b| {
        b.iter(|| std::hint::black_box(decoder.decode(&token, b"wrong").is_err()));
    });

    group.bench_function("malformed", |b| {
        b.iter(|| std::hint::black_box(decoder.decode("a.b", SECRET).is_err()));
    });
    group.finish();
}

criterion_group!(benches, benchmark_codec, benchmark_rejection);
criterion_main!(benches);
