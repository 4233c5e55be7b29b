use serde::Deserialize;
use wagecast_core::Predictor;

/// `intercept + Σ coefficients[i] · features[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn check_shape(&self, n_features: usize) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.coefficients.len() == n_features,
            "linear model has {} coefficients but the schema declares {n_features} features",
            self.coefficients.len()
        );
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &[f64]) -> anyhow::Result<f64> {
        anyhow::ensure!(
            features.len() == self.coefficients.len(),
            "expected {} features, got {}",
            self.coefficients.len(),
            features.len()
        );
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }
}
