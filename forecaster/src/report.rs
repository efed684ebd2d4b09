use std::fmt;

use crate::forecast::FORECAST_STEPS;

/// Latest close against the last forecast step.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub symbol: String,
    pub current_price: f64,
    pub forecast_price: f64,
}

impl ForecastReport {
    pub fn new(symbol: impl Into<String>, current_price: f64, forecast_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            current_price,
            forecast_price,
        }
    }

    pub fn change(&self) -> f64 {
        self.forecast_price - self.current_price
    }

    pub fn percent_change(&self) -> f64 {
        self.change() / self.current_price * 100.0
    }
}

impl fmt::Display for ForecastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📍 Current Price for {}: ${:.2}", self.symbol, self.current_price)?;
        writeln!(
            f,
            "🔮 Predicted Price in {} Days: ${:.2}",
            FORECAST_STEPS, self.forecast_price
        )?;
        write!(
            f,
            "📊 Change: ${:.2} ({:.2}%)",
            self.change(),
            self.percent_change()
        )
    }
}
