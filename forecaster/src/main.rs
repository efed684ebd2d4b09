use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use data_ingestion::logger::init_logger;
use data_ingestion::{ApiConfig, RunConfig};
use forecaster::{Pipeline, report_fatal};
use log::info;

fn read_ticker() -> Result<String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(arg);
    }

    print!("Enter stock symbol (e.g. AAPL): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logger();

    let ticker = read_ticker()?;
    let api = ApiConfig::from_env()?;
    let config = RunConfig::new(&ticker, api)?;

    info!("Starting forecast for {}..", config.ticker);
    let pipeline = Pipeline::from_config(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match pipeline.run(&config.ticker, &mut out).await {
        Ok(summary) => {
            info!("Forecast written to {}", summary.csv_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_fatal(e, &mut out)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
