use data_ingestion::PriceSeries;
use log::{debug, info, warn};
use polars::prelude::*;

use crate::error::FeatureError;
use crate::misc::{FeatureRow, FeatureTable};

/// Trailing window for SMA, momentum and volatility.
pub const WINDOW_SIZE: usize = 10;
/// Trading days between a row and its target close.
pub const HORIZON: usize = 10;
/// Fewest training rows worth fitting a model on.
pub const MIN_TRAINING_ROWS: usize = 40;

/// Derives SMA_10, momentum and volatility for every day of `series`.
///
/// The first `WINDOW_SIZE` days have no complete window and the last
/// `HORIZON` days have no target, so a series of N closes yields N - 20
/// training rows. The last 10 rows with features become the forecast seed.
pub fn extract_features(series: &PriceSeries) -> Result<FeatureTable, FeatureError> {
    let df = to_dataframe(series)?;
    let df = with_feature_columns(df)?;

    let sma_col = column_values(&df, "sma_10")?;
    let momentum_col = column_values(&df, "momentum")?;
    let volatility_col = column_values(&df, "volatility")?;
    let target_col = column_values(&df, "target")?;

    let mut featured: Vec<(FeatureRow, Option<f64>)> = Vec::with_capacity(series.len());
    for i in 0..df.height() {
        if let (Some(sma_10), Some(momentum), Some(volatility)) =
            (sma_col[i], momentum_col[i], volatility_col[i])
        {
            let row = FeatureRow {
                sma_10,
                momentum,
                volatility,
            };
            featured.push((row, target_col[i]));
        }
    }

    let (training, targets): (Vec<FeatureRow>, Vec<f64>) = featured
        .iter()
        .filter_map(|(row, target)| target.map(|t| (*row, t)))
        .unzip();

    if training.len() < MIN_TRAINING_ROWS {
        warn!(
            "{} has {} usable rows, {} required",
            series.symbol(),
            training.len(),
            MIN_TRAINING_ROWS
        );
        return Err(FeatureError::InsufficientData {
            usable: training.len(),
            required: MIN_TRAINING_ROWS,
        });
    }

    let seed_start = featured.len().saturating_sub(WINDOW_SIZE);
    let forecast_seed: Vec<FeatureRow> = featured[seed_start..].iter().map(|(row, _)| *row).collect();

    let last = series.last().ok_or(FeatureError::InsufficientData {
        usable: 0,
        required: MIN_TRAINING_ROWS,
    })?;

    info!(
        "Derived {} training rows and {} seed rows from {} closes",
        training.len(),
        forecast_seed.len(),
        series.len()
    );

    Ok(FeatureTable {
        training,
        targets,
        forecast_seed,
        last_date: last.date,
        last_close: last.close,
    })
}

fn to_dataframe(series: &PriceSeries) -> PolarsResult<DataFrame> {
    let close = Series::new("close", series.closes());
    DataFrame::new(vec![close])
}

fn trailing_window() -> RollingOptions {
    RollingOptions {
        window_size: Duration::parse(&format!("{}i", WINDOW_SIZE)),
        min_periods: WINDOW_SIZE,
        ..Default::default()
    }
}

fn with_feature_columns(df: DataFrame) -> PolarsResult<DataFrame> {
    let df = df
        .lazy()
        .with_columns([
            col("close").rolling_mean(trailing_window()).alias("sma_10"),
            (col("close") - col("close").shift(lit(WINDOW_SIZE as i64))).alias("momentum"),
            // sample std (ddof = 1) of one-step percent changes
            col("close")
                .pct_change(lit(1))
                .rolling_std(trailing_window())
                .alias("volatility"),
            col("close").shift(lit(-(HORIZON as i64))).alias("target"),
        ])
        .collect()?;

    debug!("Feature frame shape: {:?}", df.shape());
    Ok(df)
}

/// Reads a float column, treating null and NaN alike as undefined.
fn column_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    Ok(df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}
