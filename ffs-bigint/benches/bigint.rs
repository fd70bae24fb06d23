#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![allow(clippy::expect_used)]

//! Criterion benchmarks for the big-integer engine
//!
//! Multiplication and division are measured across operand sizes that cross
//! the direct-convolution threshold and the transform cap.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ffs_bigint::{BigInteger, Modulus, PrimalityOracle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn operand(digits: usize, seed: &str) -> BigInteger {
    let text: String = seed.chars().cycle().take(digits).collect();
    text.parse().expect("digit string should parse")
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("bigint_multiply");

    for digits in &[50usize, 500, 5_000, 50_000] {
        let a = operand(*digits, "31415926535897932384");
        let b = operand(*digits, "27182818284590452353");
        group.bench_with_input(BenchmarkId::from_parameter(digits), digits, |bench, _| {
            bench.iter(|| black_box(&a * &b));
        });
    }

    group.finish();
}

fn bench_divide(c: &mut Criterion) {
    let mut group = c.benchmark_group("bigint_divide");

    for digits in &[100usize, 1_000, 10_000] {
        let a = operand(*digits * 2, "98765432109876543210");
        let b = operand(*digits, "12345678901234567891");
        group.bench_with_input(BenchmarkId::from_parameter(digits), digits, |bench, _| {
            bench.iter(|| black_box(a.divide(&b).expect("non-zero divisor")));
        });
    }

    group.finish();
}

fn bench_modular(c: &mut Criterion) {
    let n = Modulus::new(
        "27606985387162255149739023449107931668458716142620601169954803000803329"
            .parse()
            .expect("modulus should parse"),
    )
    .expect("modulus above one");
    let base = n.reduce(&operand(60, "1234567890"));
    let exponent = n.value().clone();

    c.bench_function("modint_pow_71_digits", |bench| {
        bench.iter(|| black_box(base.pow(&exponent)));
    });

    c.bench_function("modint_inverse_71_digits", |bench| {
        bench.iter(|| black_box(base.inverse()));
    });
}

fn bench_primes(c: &mut Criterion) {
    let oracle = PrimalityOracle::default();

    c.bench_function("generate_prime_128_bits", |bench| {
        let mut rng = StdRng::seed_from_u64(7);
        bench.iter(|| black_box(oracle.generate_prime(128, &mut rng).expect("bit length is valid")));
    });
}

criterion_group!(benches, bench_multiply, bench_divide, bench_modular, bench_primes);
criterion_main!(benches);
