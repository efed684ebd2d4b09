use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::RunConfig;
use crate::error::DataIngestionError;
use crate::series::{PricePoint, PriceSeries};

const DAILY_SERIES_KEY: &str = "Time Series (Daily)";

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// `TIME_SERIES_DAILY` payload. Only the close is read; the API reports
/// failures as a 200 with one of the message fields instead of the series.
#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[async_trait]
pub trait PriceHistorySource {
    async fn daily_closes(&self, symbol: &str) -> Result<PriceSeries, DataIngestionError>;
}

pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
    output_size: String,
}

impl AlphaVantageClient {
    pub fn new(config: &RunConfig) -> Result<Self, DataIngestionError> {
        let client = Client::builder()
            .user_agent(concat!("forecast_terminal/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.alpha_base_url.trim_end_matches('/').to_string(),
            api_key: config.price_api_key.clone(),
            output_size: config.output_size.clone(),
        })
    }

    async fn fetch_body(&self, symbol: &str) -> Result<String, reqwest::Error> {
        let url = format!("{}/query", self.base_url);
        self.client
            .get(url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", self.output_size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .text()
            .await
    }
}

#[async_trait]
impl PriceHistorySource for AlphaVantageClient {
    async fn daily_closes(&self, symbol: &str) -> Result<PriceSeries, DataIngestionError> {
        if self.api_key.is_empty() {
            warn!("alpha_api_key is not set");
            return Err(unavailable(symbol, "alpha_api_key is not set".to_string()));
        }

        info!("Requesting daily price history for {}", symbol);

        // Transport failures count as missing data; there is no retry.
        let body = self.fetch_body(symbol).await.map_err(|e| {
            warn!("Price history request failed: {}", e);
            unavailable(symbol, e.to_string())
        })?;

        let series = parse_daily_series(symbol, &body)?;
        info!("Received {} daily closes for {}", series.len(), symbol);
        Ok(series)
    }
}

/// Turns a raw `TIME_SERIES_DAILY` body into a [`PriceSeries`].
pub fn parse_daily_series(symbol: &str, body: &str) -> Result<PriceSeries, DataIngestionError> {
    let response: DailySeriesResponse =
        serde_json::from_str(body).map_err(|e| unavailable(symbol, e.to_string()))?;

    let Some(time_series) = response.time_series else {
        let reason = response
            .error_message
            .or(response.note)
            .or(response.information)
            .unwrap_or_else(|| format!("response has no {:?} field", DAILY_SERIES_KEY));
        warn!("No daily series for {}: {}", symbol, reason);
        return Err(unavailable(symbol, reason));
    };

    // BTreeMap keys are ISO dates, so iteration is already oldest first.
    let mut points = Vec::with_capacity(time_series.len());
    for (day, bar) in time_series {
        let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
            .map_err(|_| DataIngestionError::MalformedDate(day.clone()))?;
        let close = bar
            .close
            .trim()
            .parse::<f64>()
            .map_err(|_| DataIngestionError::MalformedPrice {
                date: day.clone(),
                value: bar.close.clone(),
            })?;
        points.push(PricePoint { date, close });
    }
    debug!("Parsed {} price points for {}", points.len(), symbol);

    PriceSeries::new(symbol, points)
}

fn unavailable(symbol: &str, reason: String) -> DataIngestionError {
    DataIngestionError::DataUnavailable {
        symbol: symbol.to_string(),
        reason,
    }
}
