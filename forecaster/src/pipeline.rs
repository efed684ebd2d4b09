use std::io::Write;
use std::path::{Path, PathBuf};

use data_ingestion::{
    AlphaVantageClient, CompanyProfile, FinnhubClient, PriceHistorySource, ProfileSource,
    RunConfig,
};
use feature_processing::extract_features;
use log::{error, info, warn};

use crate::engine::{RandomForestFactory, RegressorFactory};
use crate::error::ForecastError;
use crate::export::{output_file_name, write_forecast_csv};
use crate::forecast::{ForecastPath, forecast};
use crate::report::ForecastReport;

/// What a completed run produced.
#[derive(Debug)]
pub struct ForecastSummary {
    pub report: ForecastReport,
    pub path: ForecastPath,
    pub profile: Option<CompanyProfile>,
    pub csv_path: PathBuf,
}

/// Fetch → features → fit → forecast → report → profile → CSV, in order.
pub struct Pipeline<P, C, F> {
    prices: P,
    profiles: C,
    factory: F,
    output_dir: PathBuf,
}

impl Pipeline<AlphaVantageClient, FinnhubClient, RandomForestFactory> {
    pub fn from_config(config: &RunConfig) -> Result<Self, ForecastError> {
        Ok(Self::new(
            AlphaVantageClient::new(config)?,
            FinnhubClient::new(config)?,
            RandomForestFactory,
            &config.output_dir,
        ))
    }
}

impl<P, C, F> Pipeline<P, C, F>
where
    P: PriceHistorySource,
    C: ProfileSource,
    F: RegressorFactory,
{
    pub fn new(prices: P, profiles: C, factory: F, output_dir: &Path) -> Self {
        Self {
            prices,
            profiles,
            factory,
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Runs one forecast for `symbol`, printing results to `out`.
    ///
    /// Missing or insufficient price data returns an error before anything
    /// is written to disk. A failed profile lookup only prints a warning.
    pub async fn run<W: Write>(
        &self,
        symbol: &str,
        out: &mut W,
    ) -> Result<ForecastSummary, ForecastError> {
        let series = self.prices.daily_closes(symbol).await?;
        let table = extract_features(&series)?;

        let model = self.factory.fit(&table.training, &table.targets)?;
        let path = forecast(&model, &table.forecast_seed)?;
        info!("Forecast path: {:?}", path.predictions());

        let report = ForecastReport::new(symbol, table.last_close, path.final_prediction());
        writeln!(out, "{}", report)?;

        let profile = match self.profiles.company_profile(symbol).await {
            Ok(profile) => {
                writeln!(out, "\n{}", profile)?;
                Some(profile)
            }
            Err(e) => {
                warn!("Company profile lookup failed: {}", e);
                writeln!(out, "⚠️ Could not fetch company profile.")?;
                None
            }
        };

        let csv_path = write_forecast_csv(
            &self.output_dir,
            symbol,
            table.last_date,
            &path.predictions(),
        )?;
        writeln!(out, "📁 Forecast saved to {}", output_file_name(symbol))?;

        Ok(ForecastSummary {
            report,
            path,
            profile,
            csv_path,
        })
    }
}

/// Prints the user message for a run that stopped on missing or
/// insufficient price data. Any other error is handed back unchanged.
pub fn report_fatal<W: Write>(err: ForecastError, out: &mut W) -> Result<(), ForecastError> {
    let message = if err.is_data_unavailable() {
        "❌ Failed to fetch stock data."
    } else if err.is_insufficient_data() {
        "⚠️ Not enough data to generate forecast."
    } else {
        return Err(err);
    };

    error!("{}", err);
    writeln!(out, "{}", message)?;
    Ok(())
}
