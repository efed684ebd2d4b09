use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::DataIngestionError;

const CONFIG_FILE: &str = "forecast.toml";

/// Credentials and endpoints for the two market-data providers.
///
/// Keys come from the environment (`alpha_api_key`, `finnhub_api_key`, any
/// case) and may also be set in an optional `forecast.toml`. A missing key
/// loads as empty and fails at request time like a rejected one.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub alpha_api_key: String,
    #[serde(default)]
    pub finnhub_api_key: String,
    #[serde(default = "default_alpha_base_url")]
    pub alpha_base_url: String,
    #[serde(default = "default_finnhub_base_url")]
    pub finnhub_base_url: String,
    #[serde(default = "default_output_size")]
    pub output_size: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_alpha_base_url() -> String {
    "https://www.alphavantage.co".to_string()
}

fn default_finnhub_base_url() -> String {
    "https://finnhub.io/api/v1".to_string()
}

fn default_output_size() -> String {
    "compact".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine, the variables may already be exported.
        dotenvy::dotenv().ok();
        Self::from_file(CONFIG_FILE)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::default())
            .build()?;

        cfg.try_deserialize()
    }
}

/// Everything one forecast run needs, resolved up front and handed to the
/// pipeline instead of being read from globals along the way.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub ticker: String,
    pub price_api_key: String,
    pub profile_api_key: String,
    pub alpha_base_url: String,
    pub finnhub_base_url: String,
    pub output_size: String,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn new(ticker: &str, api: ApiConfig) -> Result<Self, DataIngestionError> {
        Ok(Self {
            ticker: normalize_ticker(ticker)?,
            price_api_key: api.alpha_api_key,
            profile_api_key: api.finnhub_api_key,
            alpha_base_url: api.alpha_base_url,
            finnhub_base_url: api.finnhub_base_url,
            output_size: api.output_size,
            request_timeout_secs: api.request_timeout_secs,
            output_dir: api.output_dir,
        })
    }
}

/// Trims and upper-cases a ticker typed by the user.
pub fn normalize_ticker(raw: &str) -> Result<String, DataIngestionError> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(DataIngestionError::EmptyTicker);
    }
    Ok(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_is_trimmed_and_uppercased() {
        assert_eq!(normalize_ticker("  aapl\n").unwrap(), "AAPL");
        assert_eq!(normalize_ticker("brk.b").unwrap(), "BRK.B");
    }

    #[test]
    fn blank_ticker_is_rejected() {
        assert!(matches!(
            normalize_ticker("   \n"),
            Err(DataIngestionError::EmptyTicker)
        ));
    }
}
