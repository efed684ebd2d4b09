use chrono::{Days, NaiveDate};
use data_ingestion::{PricePoint, PriceSeries};
use feature_processing::{FeatureError, MIN_TRAINING_ROWS, extract_features};
use pretty_assertions::assert_eq;

fn series_from(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start.checked_add_days(Days::new(i as u64)).unwrap(),
            close,
        })
        .collect();
    PriceSeries::new("TEST", points).unwrap()
}

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|t| 100.0 + t as f64).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

#[test]
fn drops_leading_window_and_trailing_horizon() {
    for n in [60, 75, 100] {
        let table = extract_features(&series_from(&ramp(n))).unwrap();
        assert_eq!(table.training.len(), n - 20);
        assert_eq!(table.targets.len(), n - 20);
        assert_eq!(table.forecast_seed.len(), 10);
    }
}

#[test]
fn constant_series_has_flat_features() {
    let table = extract_features(&series_from(&[100.0; 60])).unwrap();

    for row in table.training.iter().chain(table.forecast_seed.iter()) {
        assert_close(row.sma_10, 100.0);
        assert_close(row.momentum, 0.0);
        assert_close(row.volatility, 0.0);
    }
    for target in &table.targets {
        assert_close(*target, 100.0);
    }
}

#[test]
fn ramp_matches_closed_form() {
    let closes = ramp(75);
    let table = extract_features(&series_from(&closes)).unwrap();

    // first training row sits at t = 10
    let first = table.training[0];
    assert_close(first.sma_10, 105.5);
    assert_close(first.momentum, 10.0);
    let changes: Vec<f64> = (1..=10).map(|k| closes[k] / closes[k - 1] - 1.0).collect();
    assert_close(first.volatility, sample_std(&changes));
    assert_close(table.targets[0], 120.0);

    // last training row sits at t = 64, its target at t = 74
    assert_close(*table.targets.last().unwrap(), 174.0);

    // seed covers t = 65..=74
    assert_close(table.forecast_seed[0].sma_10, 160.5);
    assert_close(table.forecast_seed[9].sma_10, 169.5);
    assert_close(table.forecast_seed[9].momentum, 10.0);

    assert_eq!(table.last_close, 174.0);
    assert_eq!(
        table.last_date,
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(74))
            .unwrap()
    );
}

#[test]
fn fewer_than_forty_rows_is_insufficient() {
    match extract_features(&series_from(&ramp(59))) {
        Err(FeatureError::InsufficientData { usable, required }) => {
            assert_eq!(usable, 39);
            assert_eq!(required, MIN_TRAINING_ROWS);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }

    assert!(extract_features(&series_from(&ramp(60))).is_ok());
}

#[test]
fn short_and_empty_series_are_insufficient() {
    let err = extract_features(&series_from(&ramp(50))).unwrap_err();
    assert!(matches!(err, FeatureError::InsufficientData { usable: 30, .. }));

    let err = extract_features(&series_from(&[])).unwrap_err();
    assert!(matches!(err, FeatureError::InsufficientData { usable: 0, .. }));
}
