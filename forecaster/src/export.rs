use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use crate::error::ForecastError;

#[derive(Debug, Serialize)]
struct ForecastRecord {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Predicted Price")]
    predicted_price: f64,
}

pub fn output_file_name(symbol: &str) -> String {
    format!("{}_forecast_terminal.csv", symbol)
}

/// The `count` calendar days after `last`. Weekends and holidays are not
/// skipped.
pub fn forecast_dates(last: NaiveDate, count: usize) -> Vec<NaiveDate> {
    last.iter_days().skip(1).take(count).collect()
}

/// Writes `Date,Predicted Price` rows into `dir` and returns the file path.
pub fn write_forecast_csv(
    dir: &Path,
    symbol: &str,
    last_date: NaiveDate,
    predictions: &[f64],
) -> Result<PathBuf, ForecastError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(output_file_name(symbol));

    let mut writer = csv::Writer::from_path(&path)?;
    let dates = forecast_dates(last_date, predictions.len());
    for (date, &predicted_price) in dates.into_iter().zip(predictions) {
        writer.serialize(ForecastRecord {
            date,
            predicted_price,
        })?;
    }
    writer.flush()?;

    info!("Wrote {} forecast rows to {}", predictions.len(), path.display());
    Ok(path)
}
