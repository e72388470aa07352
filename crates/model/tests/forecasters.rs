//! Behaviour shared by the quantile regression averaging models.
#![allow(missing_docs)]

use approx::assert_relative_eq;
use ndarray::{Array1, Array2, Axis, array};
use qra_model::prelude::*;
use qra_math::MathError;
use rstest::rstest;

/// Deterministic, roughly uniform noise in (-1, 1).
fn noise(i: usize) -> f64 {
    ((i as f64 * 12.9898).sin() * 43_758.545_3).fract()
}

/// Three noisy forecasts of a trending signal and a noisy realisation of it.
fn ensemble(n: usize) -> (Array2<f64>, Array1<f64>) {
    let signal = |i: usize| 20.0 + 0.05 * i as f64 + 3.0 * (0.11 * i as f64).sin();
    let x = Array2::from_shape_fn((n, 3), |(i, j)| {
        signal(i) + (j as f64 - 1.0) * 0.4 + 0.8 * noise(3 * i + j + 7)
    });
    let y = Array1::from_shape_fn(n, |i| signal(i) + 2.0 * noise(5 * i + 1));
    (x, y)
}

fn assert_predict_idempotent<M: QuantileForecaster>(mut model: M) {
    let (x, y) = ensemble(120);
    let fitted = model.fit(&x, &y).map(|_| ());
    if let Err(err) = fitted {
        panic!("{} failed to fit: {err}", model.name());
    }
    let first = model.predict(&x).ok();
    let second = model.predict(&x).ok();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn predict_is_idempotent() {
    assert_predict_idempotent(Qra::new(0.5).unwrap());
    assert_predict_idempotent(Qrm::new(0.5).unwrap());
    assert_predict_idempotent(Fqra::new(0.5, None).unwrap());
    assert_predict_idempotent(Fqra::new(0.5, Some(2)).unwrap());
    assert_predict_idempotent(Sfqra::new(0.5, Some(1)).unwrap());
}

#[test]
fn qrm_recovers_row_mean_target() {
    let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
    let y = array![1.5, 3.5, 5.5];

    let mut model = Qrm::new(0.5).unwrap();
    model.fit(&x, &y).unwrap();
    let prediction = model.predict(&x).unwrap();

    assert_eq!(prediction.dim(), (3, 1));
    for (p, t) in prediction.column(0).iter().zip(y.iter()) {
        assert_relative_eq!(*p, *t, epsilon = 1e-3);
    }
}

#[rstest]
#[case(0.1)]
#[case(0.5)]
#[case(0.9)]
fn qrm_ignores_column_order(#[case] tau: f64) {
    let (x, y) = ensemble(150);
    let permuted = ndarray::stack![Axis(1), x.column(2), x.column(0), x.column(1)];

    let mut original = Qrm::new(tau).unwrap();
    let mut shuffled = Qrm::new(tau).unwrap();
    original.fit(&x, &y).unwrap();
    shuffled.fit(&permuted, &y).unwrap();

    let a = original.predict(&x).unwrap();
    let b = shuffled.predict(&permuted).unwrap();
    for (p, q) in a.iter().zip(b.iter()) {
        assert_relative_eq!(*p, *q, epsilon = 1e-6, max_relative = 1e-6);
    }
}

#[test]
fn fqra_rejects_different_forecaster_count() {
    let (x, y) = ensemble(60);
    let mut model = Fqra::new(0.5, None).unwrap();
    model.fit(&x, &y).unwrap();

    let err = model.predict(&Array2::ones((5, 4))).unwrap_err();
    assert!(matches!(err, ModelError::DimensionMismatch { expected: 3, actual: 4, .. }));
}

#[test]
fn factor_selection_is_deterministic() {
    let (x, y) = ensemble(200);
    let mut first = Fqra::new(0.5, None).unwrap();
    let mut second = Fqra::new(0.5, None).unwrap();
    first.fit(&x, &y).unwrap();
    second.fit(&x, &y).unwrap();

    assert_eq!(first.selected_factors(), second.selected_factors());
    assert_eq!(first.bic_scores(), second.bic_scores());
    assert_eq!(first.bic_scores().map(<[f64]>::len), Some(3));
    assert_eq!(first.predict(&x).unwrap(), second.predict(&x).unwrap());
}

#[test]
fn sfqra_restores_row_mean_target() {
    let (x, _) = ensemble(80);
    let y = x.mean_axis(Axis(1)).unwrap();

    let mut model = Sfqra::new(0.5, None).unwrap();
    model.fit(&x, &y).unwrap();
    let prediction = model.predict(&x).unwrap();

    for (p, t) in prediction.column(0).iter().zip(y.iter()) {
        assert_relative_eq!(*p, *t, epsilon = 1e-6);
    }
}

#[rstest]
#[case(2.5)]
#[case(0.4)]
#[case(-1.0)]
fn sfqra_scales_row_mean_target(#[case] c: f64) {
    // Every row is a positive multiple of one profile, so the standardized
    // rows coincide and y = c * mean has a constant standardized target.
    let profile = [0.8, 1.0, 1.5];
    let x = Array2::from_shape_fn((60, 3), |(i, j)| {
        (10.0 + 0.2 * i as f64 + 2.0 * (0.3 * i as f64).sin()) * profile[j]
    });
    let mean = x.mean_axis(Axis(1)).unwrap();
    let y = mean.mapv(|m| c * m);

    let mut model = Sfqra::new(0.5, None).unwrap();
    model.fit(&x, &y).unwrap();
    assert_eq!(model.selected_factors(), Some(1));

    let prediction = model.predict(&x).unwrap();
    for ((p, t), m) in prediction.column(0).iter().zip(y.iter()).zip(mean.iter()) {
        assert_relative_eq!(*p, *t, epsilon = 1e-4 * m.abs());
    }
}

/// Six forecasters around a level with `patterns` cross-sectional shapes.
fn patterned_ensemble(n: usize, patterns: usize, scale: f64) -> (Array2<f64>, Array1<f64>) {
    let shapes = [[-2.0, -1.0, 0.0, 0.5, 1.0, 1.5], [1.0, -1.5, 0.5, -1.0, 1.5, -0.5]];
    let x = Array2::from_shape_fn((n, 6), |(i, j)| {
        let t = i as f64;
        let weights = [1.0 + 0.5 * (0.3 * t).sin(), (0.7 * t).cos()];
        let shape: f64 = (0..patterns).map(|s| weights[s] * shapes[s][j]).sum();
        40.0 + 0.1 * t + shape + scale * noise(6 * i + j + 11)
    });
    let y = Array1::from_shape_fn(n, |i| 40.0 + 0.1 * i as f64 + noise(3 * i + 5));
    (x, y)
}

#[rstest]
#[case(1e-3)]
#[case(0.1)]
#[case(1.0)]
fn sfqra_selection_follows_common_pattern(#[case] scale: f64) {
    let (x, y) = patterned_ensemble(300, 1, scale);
    let mut model = Sfqra::new(0.5, None).unwrap();
    model.fit(&x, &y).unwrap();

    let selected = model.selected_factors().unwrap();
    assert!(selected < 5, "selected {selected} of 5 informative directions");
    let bic = model.inner().bic_scores().unwrap();
    assert_eq!(bic.len(), 6);
    assert!(bic[5].is_infinite() && bic[5] > 0.0);
}

#[test]
fn sfqra_selection_grows_with_patterns() {
    let (one, y) = patterned_ensemble(300, 1, 0.05);
    let (two, _) = patterned_ensemble(300, 2, 0.05);

    let mut first = Sfqra::new(0.5, None).unwrap();
    let mut second = Sfqra::new(0.5, None).unwrap();
    first.fit(&one, &y).unwrap();
    second.fit(&two, &y).unwrap();

    assert!(first.selected_factors() < second.selected_factors());
}

#[test]
fn sfqra_restores_single_forecaster_target() {
    let (x, _) = ensemble(80);
    let y = x.column(0).to_owned();

    // Standardized rows span two directions, so two factors reproduce any column.
    let mut model = Sfqra::new(0.5, Some(2)).unwrap();
    model.fit(&x, &y).unwrap();
    let prediction = model.predict(&x).unwrap();

    for (p, t) in prediction.column(0).iter().zip(y.iter()) {
        assert_relative_eq!(*p, *t, epsilon = 1e-3);
    }
}

#[rstest]
#[case(Some(1))]
#[case(None)]
fn sfqra_predicts_on_target_scale(#[case] n_factors: Option<usize>) {
    let (x, y) = ensemble(200);
    let mut model = Sfqra::new(0.5, n_factors).unwrap();
    model.fit(&x, &y).unwrap();
    let prediction = model.predict(&x).unwrap();

    let mean_error =
        (&prediction.column(0) - &y).mapv(f64::abs).mean().unwrap_or(f64::INFINITY);
    assert!(mean_error < 2.0, "mean absolute error {mean_error}");
}

#[test]
fn sfqra_rejects_flat_row() {
    let (mut x, y) = ensemble(40);
    x.row_mut(7).fill(21.0);

    let mut model = Sfqra::new(0.5, None).unwrap();
    let err = model.fit(&x, &y).unwrap_err();
    assert!(matches!(err, ModelError::Math(MathError::DegenerateRow { row: 7 })));
}

#[test]
fn failed_fit_keeps_previous_state() {
    let (x, y) = ensemble(60);

    let mut qra = Qra::new(0.5).unwrap();
    qra.fit(&x, &y).unwrap();
    let before = qra.predict(&x).unwrap();
    assert!(qra.fit(&x, &Array1::zeros(10)).is_err());
    assert_eq!(qra.predict(&x).unwrap(), before);

    let mut fqra = Fqra::new(0.5, Some(2)).unwrap();
    fqra.fit(&x, &y).unwrap();
    let before = fqra.predict(&x).unwrap();
    let narrow = x.slice(ndarray::s![..1, ..]).to_owned();
    assert!(fqra.fit(&narrow, &y.slice(ndarray::s![..1]).to_owned()).is_err());
    assert_eq!(fqra.selected_factors(), Some(2));
    assert_eq!(fqra.predict(&x).unwrap(), before);
}

#[test]
fn unfitted_models_refuse_to_predict() {
    let x = Array2::ones((2, 3));
    assert!(matches!(Qra::new(0.5).unwrap().predict(&x), Err(ModelError::NotFitted)));
    assert!(matches!(Qrm::default().predict(&x), Err(ModelError::NotFitted)));
    assert!(matches!(Fqra::new(0.5, None).unwrap().predict(&x), Err(ModelError::NotFitted)));
    assert!(matches!(Sfqra::new(0.5, None).unwrap().predict(&x), Err(ModelError::NotFitted)));
}

#[test]
fn quantile_columns_are_ordered() {
    let (x, y) = ensemble(400);
    let config =
        QraConfig { quantiles: vec![0.1, 0.5, 0.9], fit_intercept: true, ..QraConfig::default() };
    let mut model = Qrm::with_config(config).unwrap();
    model.fit(&x, &y).unwrap();

    let prediction = model.predict(&x).unwrap();
    assert_eq!(prediction.dim(), (400, 3));
    for row in prediction.axis_iter(Axis(0)) {
        assert!(row[0] < row[1] && row[1] < row[2]);
    }

    let below = y.iter().zip(prediction.column(2)).filter(|(t, q)| *t <= *q).count();
    let coverage = below as f64 / y.len() as f64;
    assert!((coverage - 0.9).abs() < 0.05, "coverage {coverage}");
}
