use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use fpc::{Reader, Writer};

fn sample_values(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0xFEED_F00D);
    (0..n).map(|_| rng.gen_range(-1e6..1e6)).collect()
}

fn encode(values: &[f64], level: u8) -> Vec<u8> {
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, level).unwrap();
    for &v in values {
        w.write_float(v).unwrap();
    }
    w.close().unwrap();
    out
}

fn decode(bytes: &[u8]) {
    let mut r = Reader::new(bytes);
    let mut buf = [0u8; 8];
    loop {
        match r.read(&mut buf) {
            Ok(_) => {}
            Err(fpc::Error::Eof) => break,
            Err(e) => panic!("decode error: {:?}", e),
        }
    }
}

fn bench_codec(c: &mut Criterion) {
    let values = sample_values(100_000);
    let compressed = encode(&values, 16);

    let mut group = c.benchmark_group("codec");
    group.sample_size(20).measurement_time(Duration::new(10, 0));
    group.bench_function("encode_100k", |b| {
        b.iter(|| encode(black_box(&values), 16))
    });
    group.bench_function("decode_100k", |b| b.iter(|| decode(black_box(&compressed))));
    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
