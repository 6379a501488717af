use criterion::{criterion_group, criterion_main, Criterion};
use licensing_ecc::arithmetic::{Modular, Point, Scalar};
use licensing_ecc::Secp256k1;

use rand::rngs::OsRng;
use rand::Rng;

fn bench_point_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_mul");

    let mut rng = OsRng;
    let generator_g = Point::<Secp256k1>::GENERATOR;
    let generator_h = generator_g
        .scalar_mul(&Scalar::random(&mut rng))
        .unwrap();

    let n = 50_usize;
    let random_scalars: Vec<Scalar<Secp256k1>> =
        (0..n).map(|_| Scalar::random(&mut rng)).collect();

    group.bench_function("generator_mul", |b| {
        let i = rng.gen_range(0..n);
        b.iter(|| generator_g.scalar_mul(&random_scalars[i]))
    });

    group.bench_function("arbitrary_mul", |b| {
        let i = rng.gen_range(0..n);
        b.iter(|| generator_h.scalar_mul(&random_scalars[i]))
    });

    group.bench_function("field_inverse", |b| {
        let i = rng.gen_range(0..n);
        let x = *generator_h.scalar_mul(&random_scalars[i]).unwrap().x().unwrap();
        b.iter(|| x.inverse())
    });

    group.finish();
}

criterion_group!(benches, bench_point_mul);
criterion_main!(benches);
