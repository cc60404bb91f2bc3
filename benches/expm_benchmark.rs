use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use single_lie::{exp, SL};
use std::hint::black_box;
use std::time::Duration;

#[derive(Clone)]
pub struct ExpmConfig {
    seed: u64,
    matrix_sizes: Vec<usize>,
    norms: Vec<f64>,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for ExpmConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            matrix_sizes: vec![2, 3, 4, 8, 16, 32],
            norms: vec![0.5, 4.0, 64.0],
            measurement_time: 5,
            sample_size: 50,
        }
    }
}

fn create_test_matrix(size: usize, norm: f64, seed: u64) -> DMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let m = DMatrix::from_fn(size, size, |_, _| rng.random_range(-1.0..1.0));
    let current = m.row_iter().map(|row| row.abs().sum()).fold(0.0, f64::max);
    m * (norm / current)
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &ExpmConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_matrix_exponential(c: &mut Criterion) {
    let config = ExpmConfig::default();
    let mut group = configure_group(c, "Matrix_Exponential", &config);

    for &size in config.matrix_sizes.iter() {
        for &norm in config.norms.iter() {
            let matrix = create_test_matrix(size, norm, config.seed + size as u64);

            group.bench_with_input(
                BenchmarkId::new("scaling_squaring", format!("{}x{}_n{}", size, size, norm)),
                &matrix,
                |b, m| {
                    b.iter(|| exp(black_box(m)).unwrap());
                },
            );
        }
    }

    group.finish();
}

pub fn bench_exponential_map(c: &mut Criterion) {
    let config = ExpmConfig::default();
    let mut group = configure_group(c, "SL_Exponential_Map", &config);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let v3 = DVector::from_fn(SL::<3, f64>::DIM, |_, _| rng.random_range(-1.0..1.0));
    group.bench_function("sl3", |b| {
        b.iter(|| SL::<3, f64>::from_algebra(black_box(&v3)).unwrap());
    });

    let v4 = DVector::from_fn(SL::<4, f64>::DIM, |_, _| rng.random_range(-1.0..1.0));
    group.bench_function("sl4", |b| {
        b.iter(|| SL::<4, f64>::from_algebra(black_box(&v4)).unwrap());
    });

    let a = SL::<4, f64>::from_algebra(&v4).unwrap();
    group.bench_function("sl4_inverse", |b| {
        b.iter(|| black_box(&a).inverse().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_matrix_exponential, bench_exponential_map);
criterion_main!(benches);
