use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),

    #[error("Not enough data to generate forecast: {usable} usable rows, need at least {required}")]
    InsufficientData { usable: usize, required: usize },
}
