//! Example: Combining Point Forecasts into Prediction Intervals
//!
//! This example walks through the qra workflow on a simulated ensemble:
//! 1. Simulating a realised series and five biased, noisy point forecasts
//! 2. Moving the forecasts through the polars table boundary
//! 3. Flagging outlying forecast errors with the clipping scaler
//! 4. Fitting QRA, QRM, FQRA and sFQRA for a 90% interval and the median
//! 5. Scoring every model out of sample
//!
//! Run with: `RUST_LOG=debug cargo run --example forecast_combination`

use ndarray::{Array1, Array2, Axis, s};
use qra::{
    math::{pinball_loss, xsection_mean, xsection_std},
    model::prelude::*,
    primitives::Table,
    scalers::ClippingScaler,
    traits::Scaler,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Number of simulated days.
const N_DAYS: usize = 600;

/// Days held out for evaluation.
const N_TEST: usize = 120;

/// Bias and noise level of each forecaster.
const FORECASTERS: &[(f64, f64)] =
    &[(0.0, 2.0), (1.5, 1.5), (-1.0, 3.0), (0.5, 2.5), (-2.0, 1.0)];

/// Quantile levels to forecast.
const QUANTILES: &[f64] = &[0.05, 0.5, 0.95];

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Step 1: Simulate data
    let (forecasts, realised) = simulate(42)?;
    info!(days = N_DAYS, forecasters = FORECASTERS.len(), "simulated ensemble");

    // Step 2: Round-trip through a polars frame
    let table = labelled(&forecasts)?;
    let frame = table.to_frame("day")?;
    let table = Table::from_frame(&frame, Some("day"))?;
    info!(rows = frame.height(), columns = frame.width(), "loaded forecasts");

    // Step 3: Outlying forecasts
    report_outliers(&table)?;

    // Step 4 and 5: Fit on the training window, score on the test window
    let n_train = N_DAYS - N_TEST;
    let x = table.values();
    let (x_train, x_test) =
        (x.slice(s![..n_train, ..]).to_owned(), x.slice(s![n_train.., ..]).to_owned());
    let (y_train, y_test) =
        (realised.slice(s![..n_train]).to_owned(), realised.slice(s![n_train..]).to_owned());

    let config = QraConfig { quantiles: QUANTILES.to_vec(), ..QraConfig::default() };
    let factor_config = FqraConfig { qra: config.clone(), n_factors: None };

    print_header();

    let mut qra = Qra::with_config(config.clone())?;
    qra.fit(&x_train, &y_train)?;
    print_scores(qra.name(), &qra.predict(&x_test)?, &y_test);

    let mut qrm = Qrm::with_config(config)?;
    qrm.fit(&x_train, &y_train)?;
    print_scores(qrm.name(), &qrm.predict(&x_test)?, &y_test);

    let mut fqra = Fqra::with_config(factor_config.clone())?;
    fqra.fit(&x_train, &y_train)?;
    print_scores(fqra.name(), &fqra.predict(&x_test)?, &y_test);
    if let (Some(k), Some(bic)) = (fqra.selected_factors(), fqra.bic_scores()) {
        info!(selected = k, ?bic, "fqra factor selection");
    }

    let mut sfqra = Sfqra::with_config(factor_config)?;
    sfqra.fit(&x_train, &y_train)?;
    print_scores(sfqra.name(), &sfqra.predict(&x_test)?, &y_test);
    if let Some(k) = sfqra.selected_factors() {
        info!(selected = k, "sfqra factor selection");
    }

    Ok(())
}

// ============================================================================
// DATA
// ============================================================================

/// Simulate a seasonal series and a forecast ensemble around it.
fn simulate(seed: u64) -> Result<(Array2<f64>, Array1<f64>), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let shock = Normal::new(0.0, 4.0)?;

    let level: Array1<f64> = Array1::from_shape_fn(N_DAYS, |t| {
        let t = t as f64;
        60.0 + 0.02 * t + 8.0 * (2.0 * std::f64::consts::PI * t / 7.0).sin()
    });
    let realised = level.mapv(|l| l + shock.sample(&mut rng));

    let mut forecasts = Array2::zeros((N_DAYS, FORECASTERS.len()));
    for (j, &(bias, sigma)) in FORECASTERS.iter().enumerate() {
        let noise = Normal::new(bias, sigma)?;
        for (value, l) in forecasts.column_mut(j).iter_mut().zip(level.iter()) {
            *value = l + noise.sample(&mut rng);
        }
    }

    Ok((forecasts, realised))
}

fn labelled(forecasts: &Array2<f64>) -> Result<Table, Box<dyn std::error::Error>> {
    let columns = (0..forecasts.ncols()).map(|j| format!("model_{j}")).collect();
    let index = (0..forecasts.nrows()).map(|t| format!("day_{t:04}")).collect();
    Ok(Table::new(columns, Some(index), forecasts.clone())?)
}

/// Count forecasts more than three cross-sectional deviations from the mean.
fn report_outliers(table: &Table) -> Result<(), Box<dyn std::error::Error>> {
    let x = table.values();
    let mean = xsection_mean(x)?.insert_axis(Axis(1));
    let std = xsection_std(x)?.insert_axis(Axis(1));
    let deviations = table.relabeled((x - &mean) / &std)?;

    let scaler = ClippingScaler::default();
    let clipped = scaler.transform(&deviations, None)?;
    let changed = deviations
        .values()
        .iter()
        .zip(clipped.x.values().iter())
        .filter(|(a, b)| a != b)
        .count();

    info!(threshold = scaler.threshold(), outliers = changed, "cross-sectional outliers");
    Ok(())
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_header() {
    println!("\n{:<8} {:>10} {:>10} {:>10} {:>10}", "model", "pinball", "mae", "coverage", "width");
    println!("{}", "-".repeat(52));
}

fn print_scores(name: &str, prediction: &Array2<f64>, realised: &Array1<f64>) {
    let lower = prediction.column(0);
    let median = prediction.column(1);
    let upper = prediction.column(2);

    let pinball: f64 = QUANTILES
        .iter()
        .enumerate()
        .map(|(j, &tau)| pinball_loss(&(realised - &prediction.column(j)), tau))
        .sum::<f64>()
        / QUANTILES.len() as f64;
    let mae = (realised - &median).mapv(f64::abs).mean().unwrap_or(f64::NAN);
    let inside = realised
        .iter()
        .zip(lower.iter().zip(upper.iter()))
        .filter(|&(y, (lo, hi))| lo <= y && y <= hi)
        .count();
    let coverage = inside as f64 / realised.len() as f64;
    let width = (&upper - &lower).mean().unwrap_or(f64::NAN);

    println!("{name:<8} {pinball:>10.4} {mae:>10.4} {coverage:>10.2} {width:>10.4}");
}
