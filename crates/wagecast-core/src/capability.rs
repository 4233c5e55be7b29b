//! The opaque prediction capability a sector's model provides.

/// Maps an ordered numeric feature vector to a raw wage estimate.
///
/// Implementations must be deterministic for a fixed input and must not
/// consult feature names: position `i` of `features` is column `i` of the
/// sector's feature order.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &[f64]) -> anyhow::Result<f64>;
}

impl<F> Predictor for F
where
    F: Fn(&[f64]) -> anyhow::Result<f64> + Send + Sync,
{
    fn predict(&self, features: &[f64]) -> anyhow::Result<f64> {
        self(features)
    }
}
