use data_ingestion::DataIngestionError;
use feature_processing::FeatureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error(transparent)]
    Ingestion(#[from] DataIngestionError),

    #[error(transparent)]
    Features(#[from] FeatureError),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Forecast needs at least one seed row")]
    EmptySeed,

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ForecastError {
    /// Price history was missing from the provider response.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            ForecastError::Ingestion(DataIngestionError::DataUnavailable { .. })
        )
    }

    /// Too few usable rows survived feature derivation.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            ForecastError::Features(FeatureError::InsufficientData { .. })
        )
    }
}
