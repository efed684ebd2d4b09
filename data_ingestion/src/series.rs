use chrono::NaiveDate;

use crate::error::DataIngestionError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closes for one symbol, oldest first.
///
/// Dates are strictly increasing and every close is a positive finite
/// number. The series is never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, DataIngestionError> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DataIngestionError::InvalidSeries(format!(
                    "dates not strictly increasing at {} -> {}",
                    pair[0].date, pair[1].date
                )));
            }
        }

        if let Some(bad) = points.iter().find(|p| !(p.close.is_finite() && p.close > 0.0)) {
            return Err(DataIngestionError::InvalidSeries(format!(
                "non-positive close {} on {}",
                bad.close, bad.date
            )));
        }

        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
