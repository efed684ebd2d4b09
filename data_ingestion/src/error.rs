use config;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataIngestionError {
    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Config not found: {0}")]
    ConfigValueNotFoundError(#[from] config::ConfigError),

    #[error("Price data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("Malformed close price {value:?} on {date}")]
    MalformedPrice { date: String, value: String },

    #[error("Malformed date {0:?} in price history")]
    MalformedDate(String),

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Ticker symbol must not be empty")]
    EmptyTicker,

    #[error("Profile request failed with status {0}")]
    ProfileStatus(reqwest::StatusCode),
}
