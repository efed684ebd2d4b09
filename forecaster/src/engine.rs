use feature_processing::FeatureRow;
use log::{debug, info};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::ForecastError;

const NUM_FEATURES: usize = FeatureRow::WIDTH;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// A fitted model mapping one feature row to a price.
#[cfg_attr(test, mockall::automock)]
pub trait Regressor {
    fn predict(&self, row: &FeatureRow) -> Result<f64, ForecastError>;
}

/// Trains a [`Regressor`] on feature rows and their targets.
pub trait RegressorFactory {
    type Model: Regressor;

    fn fit(&self, features: &[FeatureRow], targets: &[f64]) -> Result<Self::Model, ForecastError>;
}

/// Random forest with 100 trees and a fixed seed, so repeated runs on the
/// same data give the same forecast. Every split considers all features.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomForestFactory;

impl RandomForestFactory {
    fn parameters() -> RandomForestRegressorParameters {
        RandomForestRegressorParameters {
            n_trees: 100,
            m: Some(NUM_FEATURES),
            seed: 42,
            ..Default::default()
        }
    }
}

impl RegressorFactory for RandomForestFactory {
    type Model = InferenceEngine;

    fn fit(&self, features: &[FeatureRow], targets: &[f64]) -> Result<InferenceEngine, ForecastError> {
        if features.len() != targets.len() {
            return Err(ForecastError::Model(format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            )));
        }

        info!("🚀Fitting random forest on {} rows...", features.len());
        let rows: Vec<Vec<f64>> = features.iter().map(FeatureRow::to_vec).collect();
        let x = DenseMatrix::from_2d_vec(&rows);
        let y = targets.to_vec();

        let forest = Forest::fit(&x, &y, Self::parameters())
            .map_err(|e| ForecastError::Model(e.to_string()))?;
        info!("Model fitted✅");

        Ok(InferenceEngine { forest })
    }
}

pub struct InferenceEngine {
    forest: Forest,
}

impl Regressor for InferenceEngine {
    fn predict(&self, row: &FeatureRow) -> Result<f64, ForecastError> {
        let input = DenseMatrix::from_2d_vec(&vec![row.to_vec()]);
        let output = self
            .forest
            .predict(&input)
            .map_err(|e| ForecastError::Model(e.to_string()))?;

        let predicted = output
            .first()
            .copied()
            .ok_or_else(|| ForecastError::Model(format!("no output for {} inputs", NUM_FEATURES)))?;
        debug!("predict({:?}) = {}", row, predicted);
        Ok(predicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> (Vec<FeatureRow>, Vec<f64>) {
        let features: Vec<FeatureRow> = (0..n)
            .map(|i| FeatureRow {
                sma_10: 100.0 + i as f64,
                momentum: (i % 7) as f64 - 3.0,
                volatility: 0.01 * (i % 5) as f64,
            })
            .collect();
        let targets = features.iter().map(|r| r.sma_10 + 2.0 * r.momentum).collect();
        (features, targets)
    }

    #[test]
    fn constant_targets_predict_the_constant() {
        let (features, _) = rows(50);
        let targets = vec![50.0; features.len()];

        let model = RandomForestFactory.fit(&features, &targets).unwrap();

        assert_eq!(model.predict(&features[10]).unwrap(), 50.0);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let (features, targets) = rows(60);
        let probe = FeatureRow {
            sma_10: 130.5,
            momentum: 1.0,
            volatility: 0.02,
        };

        let first = RandomForestFactory.fit(&features, &targets).unwrap();
        let second = RandomForestFactory.fit(&features, &targets).unwrap();

        assert_eq!(
            first.predict(&probe).unwrap(),
            second.predict(&probe).unwrap()
        );
    }

    #[test]
    fn single_informative_feature_is_fitted_closely() {
        // only sma_10 drives the target, the other two columns are noise
        let features: Vec<FeatureRow> = (0..80)
            .map(|i| FeatureRow {
                sma_10: 100.0 + i as f64,
                momentum: ((i * 37) % 11) as f64 - 5.0,
                volatility: ((i * 53) % 17) as f64 * 0.003,
            })
            .collect();
        let targets: Vec<f64> = features.iter().map(|r| 2.0 * r.sma_10).collect();

        let model = RandomForestFactory.fit(&features, &targets).unwrap();

        let mae = features
            .iter()
            .zip(&targets)
            .map(|(row, target)| (model.predict(row).unwrap() - target).abs())
            .sum::<f64>()
            / features.len() as f64;
        assert!(mae < 2.0, "in-sample MAE too large: {mae}");
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let (features, targets) = rows(10);
        let err = RandomForestFactory.fit(&features, &targets[..9]).err().unwrap();
        assert!(matches!(err, ForecastError::Model(_)));
    }
}
