//! Benchmarks for qra-model fitting and prediction.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::{Array1, Array2};
use qra_model::prelude::*;
use rand::Rng;

/// Noisy forecasts of a common signal, plus a noisy realisation.
fn random_ensemble(n_obs: usize, n_forecasters: usize) -> (Array2<f64>, Array1<f64>) {
    let mut rng = rand::thread_rng();
    let signal: Array1<f64> =
        Array1::from_iter((0..n_obs).map(|_| rng.r#gen::<f64>() * 40.0 + 30.0));
    let x = Array2::from_shape_fn((n_obs, n_forecasters), |(i, _)| {
        signal[i] + rng.r#gen::<f64>() * 4.0 - 2.0
    });
    let y = signal.mapv(|s| s + rng.r#gen::<f64>() * 8.0 - 4.0);
    (x, y)
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    group.sample_size(10);

    // (observations, forecasters)
    let scenarios = [(250, 4), (1000, 8), (2000, 16)];

    for (n_obs, n_forecasters) in scenarios {
        let (x, y) = random_ensemble(n_obs, n_forecasters);
        let label = format!("{n_obs}x{n_forecasters}");
        group.throughput(Throughput::Elements(n_obs as u64));

        group.bench_with_input(BenchmarkId::new("qra", &label), &(&x, &y), |b, (x, y)| {
            b.iter(|| {
                let mut model = Qra::new(0.5).unwrap();
                model.fit(black_box(x), black_box(y)).unwrap().is_fitted()
            });
        });
        group.bench_with_input(BenchmarkId::new("qrm", &label), &(&x, &y), |b, (x, y)| {
            b.iter(|| {
                let mut model = Qrm::new(0.5).unwrap();
                model.fit(black_box(x), black_box(y)).unwrap().is_fitted()
            });
        });
        group.bench_with_input(BenchmarkId::new("fqra_bic", &label), &(&x, &y), |b, (x, y)| {
            b.iter(|| {
                let mut model = Fqra::new(0.5, None).unwrap();
                model.fit(black_box(x), black_box(y)).unwrap().is_fitted()
            });
        });
        group.bench_with_input(BenchmarkId::new("sfqra", &label), &(&x, &y), |b, (x, y)| {
            b.iter(|| {
                let mut model = Sfqra::new(0.5, Some(2)).unwrap();
                model.fit(black_box(x), black_box(y)).unwrap().is_fitted()
            });
        });
    }

    group.finish();
}

fn bench_multi_quantile(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_quantile");
    group.sample_size(10);

    let (x, y) = random_ensemble(1000, 8);
    for n_quantiles in [1, 3, 9] {
        let quantiles: Vec<f64> =
            (1..=n_quantiles).map(|i| i as f64 / (n_quantiles + 1) as f64).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(n_quantiles),
            &quantiles,
            |b, quantiles| {
                let config = QraConfig { quantiles: quantiles.clone(), ..QraConfig::default() };
                b.iter(|| {
                    let mut model = Qra::with_config(config.clone()).unwrap();
                    model.fit(black_box(&x), black_box(&y)).unwrap().is_fitted()
                });
            },
        );
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    let (x, y) = random_ensemble(1000, 8);
    let mut fqra = Fqra::new(0.5, None).unwrap();
    fqra.fit(&x, &y).unwrap();
    let mut sfqra = Sfqra::new(0.5, None).unwrap();
    sfqra.fit(&x, &y).unwrap();

    for n_obs in [100, 1000, 10000] {
        let (x_new, _) = random_ensemble(n_obs, 8);
        group.throughput(Throughput::Elements(n_obs as u64));
        group.bench_with_input(BenchmarkId::new("fqra", n_obs), &x_new, |b, x_new| {
            b.iter(|| fqra.predict(black_box(x_new)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("sfqra", n_obs), &x_new, |b, x_new| {
            b.iter(|| sfqra.predict(black_box(x_new)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_multi_quantile, bench_predict);
criterion_main!(benches);
