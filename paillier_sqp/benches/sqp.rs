use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigUint;
use paillier_sqp::{paillier_decrypt, paillier_encrypt, paillier_keygen, sqp};

fn criterion_cipher(c: &mut Criterion) {
    c.bench_function("keygen 512", |b| b.iter(|| paillier_keygen(512).unwrap()));

    let (pk, sk) = paillier_keygen(1024).unwrap();
    let m = BigUint::from(9_589_489_438u64);
    c.bench_function("encrypt 1024", |b| b.iter(|| paillier_encrypt(&pk, &m).unwrap()));

    let ct = paillier_encrypt(&pk, &m).unwrap();
    c.bench_function("decrypt 1024", |b| b.iter(|| paillier_decrypt(&sk, &pk, &ct).unwrap()));
}

fn criterion_sqp(c: &mut Criterion) {
    let (pk, sk) = paillier_keygen(1024).unwrap();
    let mut group = c.benchmark_group("sqp");
    // Operand values don't matter for the timing, only their width
    for l in [10u64, 20, 50, 100] {
        let top = (BigUint::from(1u32) << l) - 1u32;
        let a = paillier_encrypt(&pk, &top).unwrap();
        let b = paillier_encrypt(&pk, &(&top >> 1)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(l), &l, |bench, &l| {
            bench.iter(|| sqp(&a, &b, &pk, &sk, l).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = criterion_cipher, criterion_sqp
);
criterion_main!(benches);
