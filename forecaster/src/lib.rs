pub mod engine;
pub mod error;
pub mod export;
pub mod forecast;
pub mod pipeline;
pub mod report;

pub use crate::engine::{InferenceEngine, RandomForestFactory, Regressor, RegressorFactory};
pub use crate::error::ForecastError;
pub use crate::forecast::{FORECAST_STEPS, ForecastPath, ForecastStep, forecast};
pub use crate::pipeline::{ForecastSummary, Pipeline, report_fatal};
pub use crate::report::ForecastReport;
