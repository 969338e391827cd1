use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keyprint::{Algorithm, ImageFormat, Keyprint, PublicKey};

const ALICE: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

fn bench_generate(c: &mut Criterion) {
    let kp = Keyprint::default();
    let key = PublicKey::Hex(ALICE.to_string());

    let mut group = c.benchmark_group("generate");
    for algorithm in Algorithm::ALL {
        for format in [ImageFormat::Vector, ImageFormat::Raster] {
            let id = BenchmarkId::new(algorithm.as_str(), format!("{:?}", format).to_lowercase());
            group.bench_with_input(id, &format, |b, &format| {
                b.iter(|| kp.generate(black_box(&key), algorithm, 64, format))
            });
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let hex_key = PublicKey::Hex(ALICE.to_string());
    let ss58_key = PublicKey::Base58("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".to_string());

    c.bench_function("decode_hex", |b| b.iter(|| black_box(&hex_key).decode()));
    c.bench_function("decode_ss58", |b| b.iter(|| black_box(&ss58_key).decode()));
}

criterion_group!(benches, bench_generate, bench_decode);
criterion_main!(benches);
