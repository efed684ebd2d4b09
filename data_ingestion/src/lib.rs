pub mod config;
pub mod error;
pub mod fetcher;
pub mod logger;
pub mod profile;
pub mod series;

pub use crate::config::{ApiConfig, RunConfig};
pub use crate::error::DataIngestionError;
pub use crate::fetcher::{AlphaVantageClient, PriceHistorySource};
pub use crate::profile::{CompanyProfile, FinnhubClient, ProfileSource};
pub use crate::series::{PricePoint, PriceSeries};
