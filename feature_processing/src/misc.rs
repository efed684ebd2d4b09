use chrono::NaiveDate;

/// One day's model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub sma_10: f64,
    pub momentum: f64,
    pub volatility: f64,
}

impl FeatureRow {
    pub const WIDTH: usize = 3;

    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.sma_10, self.momentum, self.volatility]
    }
}

/// Output of feature derivation.
///
/// `training[i]` pairs with `targets[i]`. `forecast_seed` is the latest
/// rows that have features but no target yet; it seeds the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub training: Vec<FeatureRow>,
    pub targets: Vec<f64>,
    pub forecast_seed: Vec<FeatureRow>,
    pub last_date: NaiveDate,
    pub last_close: f64,
}
