use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use ndarray::{Array1, Zip};
use q15_axpy::kernel::q15_axpy_with;
use q15_axpy::q15::{saturating_q15_axpy_step, Q15_HALF};
use q15_axpy::simd::{Engine, RegisterGroup, SimdAxpy};
use q15_axpy::verify::random_samples;
use rand::rngs::StdRng;
use rand::SeedableRng;

// --- Configuration ---
const VECTOR_LENGTHS: &[usize] = &[
    1024,      // one verification run
    65_536,
    4_194_304, // Large: several rayon tasks per core
];

fn generate_data(len: usize) -> (Vec<i16>, Vec<i16>) {
    let mut rng = StdRng::seed_from_u64(12345);

    let a = random_samples(&mut rng, len);
    let b = random_samples(&mut rng, len);

    (a, b)
}

fn bench_q15_axpy(c: &mut Criterion) {
    let engine = Engine::detect();
    println!("Benchmarking on {}", engine.backend().name());

    for &vector_len in VECTOR_LENGTHS.iter() {
        let mut group = c.benchmark_group(format!("Q15Axpy/{vector_len}"));
        group.throughput(Throughput::Elements(vector_len as u64));

        let (a_vec, b_vec) = generate_data(vector_len);

        // --- Benchmark 1: Scalar (truncating reference) ---
        group.bench_function("scalar axpy", |bencher| {
            let mut y = a_vec.clone();
            bencher.iter(|| {
                y.scalar_axpy(black_box(b_vec.as_slice()), black_box(Q15_HALF));
                black_box(&y);
            });
        });

        // --- Benchmark 2: Strip-mined kernel, one entry per register group ---
        for register_group in RegisterGroup::ALL {
            let unit = engine.with_group(register_group);
            let mut y = vec![0i16; vector_len];

            group.bench_function(format!("simd axpy {register_group:?}"), |bencher| {
                bencher.iter(|| {
                    q15_axpy_with(&unit, black_box(&a_vec), black_box(&b_vec), &mut y, Q15_HALF);
                    black_box(&y);
                });
            });
        }

        // --- Benchmark 3: Parallel kernel ---
        group.bench_function("parallel simd axpy", |bencher| {
            let mut y = a_vec.clone();
            bencher.iter(|| {
                y.par_simd_axpy(black_box(b_vec.as_slice()), black_box(Q15_HALF));
                black_box(&y);
            });
        });

        // --- Benchmark 4: ndarray ---
        // Zip over owned arrays with the scalar step as the element function.
        let a_arr = Array1::from_vec(a_vec.clone());
        let b_arr = Array1::from_vec(b_vec.clone());
        let mut y_arr = Array1::<i16>::zeros(vector_len);

        group.bench_function("ndarray zip", |bencher| {
            bencher.iter(|| {
                Zip::from(&mut y_arr)
                    .and(&a_arr)
                    .and(&b_arr)
                    .for_each(|y, &a, &b| *y = saturating_q15_axpy_step(a, b, Q15_HALF));
                black_box(&y_arr);
            });
        });

        group.finish();
    }
}

criterion_group!(benches, bench_q15_axpy);
criterion_main!(benches);
