use feature_processing::FeatureRow;
use log::debug;

use crate::engine::Regressor;
use crate::error::ForecastError;

/// Number of self-fed prediction steps.
pub const FORECAST_STEPS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastStep {
    /// Row the prediction was made from. Only the first is real market data.
    pub features: FeatureRow,
    pub predicted: f64,
}

/// Exactly [`FORECAST_STEPS`] predictions, each fed by the one before it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPath {
    steps: Vec<ForecastStep>,
}

impl ForecastPath {
    pub fn steps(&self) -> &[ForecastStep] {
        &self.steps
    }

    pub fn predictions(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.predicted).collect()
    }

    pub fn final_prediction(&self) -> f64 {
        // never empty: `forecast` always pushes FORECAST_STEPS steps
        self.steps[self.steps.len() - 1].predicted
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Rolls `model` forward [`FORECAST_STEPS`] times starting from `seed`.
///
/// Each prediction is turned into a synthetic feature row and appended to a
/// working buffer that starts as a copy of `seed`:
/// SMA is the average of the buffer's mean SMA and the prediction, momentum
/// is the prediction minus the last row's SMA, and volatility is the
/// buffer's mean volatility.
pub fn forecast<R: Regressor + ?Sized>(
    model: &R,
    seed: &[FeatureRow],
) -> Result<ForecastPath, ForecastError> {
    let mut buffer = seed.to_vec();
    let mut steps = Vec::with_capacity(FORECAST_STEPS);

    for step in 0..FORECAST_STEPS {
        let last = *buffer.last().ok_or(ForecastError::EmptySeed)?;
        let predicted = model.predict(&last)?;
        debug!("step {}: predicted {:.4}", step + 1, predicted);

        let next = synthesize_next(&buffer, &last, predicted);
        steps.push(ForecastStep {
            features: last,
            predicted,
        });
        buffer.push(next);
    }

    Ok(ForecastPath { steps })
}

fn synthesize_next(buffer: &[FeatureRow], last: &FeatureRow, predicted: f64) -> FeatureRow {
    let n = buffer.len() as f64;
    let mean_sma = buffer.iter().map(|r| r.sma_10).sum::<f64>() / n;
    let mean_volatility = buffer.iter().map(|r| r.volatility).sum::<f64>() / n;

    FeatureRow {
        sma_10: (mean_sma + predicted) / 2.0,
        momentum: predicted - last.sma_10,
        volatility: mean_volatility,
    }
}
