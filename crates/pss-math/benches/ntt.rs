use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pss_math::{
    ntt::{primitive_root_of_unity, RootTable},
    zq::{primes::generate_prime, Modulus},
};
use rand::thread_rng;

pub fn ntt_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ntt");
    group.sample_size(50);

    let mut rng = thread_rng();
    let p = generate_prime(62, 1 << 21, 1 << 62).unwrap();
    let q = Modulus::new(p).unwrap();
    let table = RootTable::new(&q, primitive_root_of_unity(&q, 1 << 14).unwrap()).unwrap();

    for size in [256, 1024, 4096] {
        let op = table.operator(size).unwrap();
        let mut a = q.random_vec(size, &mut rng);

        group.bench_function(BenchmarkId::new("forward", size), |b| {
            b.iter(|| op.forward(&mut a));
        });

        group.bench_function(BenchmarkId::new("backward", size), |b| {
            b.iter(|| op.backward(&mut a));
        });

        group.bench_function(BenchmarkId::new("twist", size), |b| {
            b.iter(|| table.twist(&mut a));
        });
    }

    group.finish();
}

criterion_group!(ntt, ntt_benchmark);
criterion_main!(ntt);
