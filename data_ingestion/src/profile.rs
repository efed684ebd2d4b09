use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::config::RunConfig;
use crate::error::DataIngestionError;

const MISSING: &str = "N/A";

/// Finnhub `stock/profile2` fields shown to the user. Unknown symbols come
/// back as `{}`, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    pub industry: Option<String>,
    pub exchange: Option<String>,
    #[serde(rename = "weburl")]
    pub website: Option<String>,
}

impl CompanyProfile {
    pub fn from_json(body: &str) -> Result<Self, DataIngestionError> {
        Ok(serde_json::from_str(body)?)
    }
}

fn or_missing(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

impl fmt::Display for CompanyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🏢 Company Information")?;
        writeln!(f, "Name: {}", or_missing(&self.name))?;
        writeln!(f, "Industry: {}", or_missing(&self.industry))?;
        writeln!(f, "Exchange: {}", or_missing(&self.exchange))?;
        write!(f, "Website: {}", or_missing(&self.website))
    }
}

#[async_trait]
pub trait ProfileSource {
    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, DataIngestionError>;
}

pub struct FinnhubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl FinnhubClient {
    pub fn new(config: &RunConfig) -> Result<Self, DataIngestionError> {
        let client = Client::builder()
            .user_agent(concat!("forecast_terminal/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.finnhub_base_url.trim_end_matches('/').to_string(),
            token: config.profile_api_key.clone(),
        })
    }
}

#[async_trait]
impl ProfileSource for FinnhubClient {
    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, DataIngestionError> {
        info!("Requesting company profile for {}", symbol);
        let url = format!("{}/stock/profile2", self.base_url);

        let response = self
            .client
            .get(url)
            .query(&[("symbol", symbol), ("token", self.token.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataIngestionError::ProfileStatus(response.status()));
        }

        let body = response.text().await?;
        debug!("Profile payload is {} bytes", body.len());
        CompanyProfile::from_json(&body)
    }
}
