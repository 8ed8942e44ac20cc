use criterion::{black_box, criterion_group, criterion_main, BenchmarkGroup, Criterion};
use criterion::measurement::Measurement;
use multi_modexp::{double_exp, exp_parallel, fourfold_exp, Nat, PreTable};
use rand_chacha::ChaChaRng;
use rand_core::{RngCore, SeedableRng};

/// Base and modulus size in bits.
const UINT_BITS: usize = 2048;

/// Exponent size in bits.
const EXP_BITS: usize = 8192;

fn random_nat(rng: &mut ChaChaRng, bits: usize) -> Nat {
    let mut bytes = vec![0u8; bits / 8];
    rng.fill_bytes(&mut bytes);
    Nat::from_be_slice(&bytes)
}

fn random_odd_modulus(rng: &mut ChaChaRng, bits: usize) -> Nat {
    let n = random_nat(rng, bits);
    let mut words = n.to_words();
    words[0] |= 1;
    Nat::from_words(words)
}

fn bench_shared_ladder<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let mut rng = ChaChaRng::seed_from_u64(1);
    let x = random_nat(&mut rng, UINT_BITS);
    let m = random_odd_modulus(&mut rng, UINT_BITS);
    let y1 = random_nat(&mut rng, EXP_BITS);
    let y2 = random_nat(&mut rng, EXP_BITS);
    let y3 = random_nat(&mut rng, EXP_BITS);
    let y4 = random_nat(&mut rng, EXP_BITS);

    group.bench_function(format!("sequential x2, {EXP_BITS}-bit exponents"), |b| {
        b.iter(|| {
            (
                black_box(&x).exp_mod(black_box(&y1), black_box(&m)),
                black_box(&x).exp_mod(black_box(&y2), black_box(&m)),
            )
        })
    });

    group.bench_function(format!("double_exp, {EXP_BITS}-bit exponents"), |b| {
        b.iter(|| {
            double_exp(
                black_box(&x),
                black_box(&m),
                &[y1.clone(), y2.clone()],
            )
        })
    });

    group.bench_function(format!("fourfold_exp, {EXP_BITS}-bit exponents"), |b| {
        b.iter(|| {
            fourfold_exp(
                black_box(&x),
                black_box(&m),
                &[y1.clone(), y2.clone(), y3.clone(), y4.clone()],
            )
        })
    });
}

fn bench_table_driven<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let mut rng = ChaChaRng::seed_from_u64(2);
    let x = random_nat(&mut rng, UINT_BITS);
    let m = random_odd_modulus(&mut rng, UINT_BITS);
    let y = random_nat(&mut rng, EXP_BITS);
    let table = PreTable::new(&x, &m, y.nlimbs() + 1).expect("valid table inputs");

    for workers in [1, 2, 4, 8] {
        group.bench_function(format!("exp_parallel, {workers} workers"), |b| {
            b.iter(|| {
                exp_parallel(
                    black_box(&x),
                    black_box(&y),
                    black_box(&m),
                    &table,
                    workers,
                    2,
                )
            })
        });
    }
}

fn bench_multiexp(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared ladder");
    bench_shared_ladder(&mut group);
    group.finish();

    let mut group = c.benchmark_group("table driven");
    bench_table_driven(&mut group);
    group.finish();
}

criterion_group!(benches, bench_multiexp);
criterion_main!(benches);
