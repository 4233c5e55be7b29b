//! Bundled model evaluators.
//!
//! A sector's model artifact is a JSON document tagged by `kind`. Each kind
//! deserialises into an evaluator implementing [`Predictor`], and is checked
//! against the sector's feature count before it is ever called.

mod linear;
mod trees;

use std::sync::Arc;

use serde::Deserialize;
use wagecast_core::Predictor;

pub use linear::LinearModel;
pub use trees::{Tree, TreeEnsemble, TreeNode};

/// On-disk model description.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelSpec {
    /// Check the model can consume vectors of `n_features` columns.
    pub fn check_shape(&self, n_features: usize) -> anyhow::Result<()> {
        match self {
            Self::Linear(m) => m.check_shape(n_features),
            Self::TreeEnsemble(m) => m.check_shape(n_features),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// Shape-check and wrap as a shareable prediction capability.
    pub fn into_predictor(self, n_features: usize) -> anyhow::Result<Arc<dyn Predictor>> {
        self.check_shape(n_features)?;
        let predictor: Arc<dyn Predictor> = match self {
            Self::Linear(m) => Arc::new(m),
            Self::TreeEnsemble(m) => Arc::new(m),
        };
        Ok(predictor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_linear_by_kind() {
        let spec: ModelSpec = serde_json::from_str(
            r#"{"kind": "linear", "intercept": 100.0, "coefficients": [2.0, 3.0]}"#,
        )
        .unwrap();
        assert_eq!(spec.kind(), "linear");

        let predictor = spec.into_predictor(2).unwrap();
        assert_eq!(predictor.predict(&[1.0, 1.0]).unwrap(), 105.0);
    }

    #[test]
    fn deserializes_tree_ensemble_by_kind() {
        let spec: ModelSpec = serde_json::from_str(
            r#"{
                "kind": "tree_ensemble",
                "base_score": 300.0,
                "trees": [
                    {"nodes": [
                        {"split": {"feature": 0, "threshold": 30.0, "left": 1, "right": 2}},
                        {"leaf": -20.0},
                        {"leaf": 45.0}
                    ]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(spec.kind(), "tree_ensemble");

        let predictor = spec.into_predictor(1).unwrap();
        assert_eq!(predictor.predict(&[25.0]).unwrap(), 280.0);
        assert_eq!(predictor.predict(&[35.0]).unwrap(), 345.0);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_str::<ModelSpec>(r#"{"kind": "pickle"}"#).unwrap_err();
        assert!(err.to_string().contains("pickle"));
    }

    #[test]
    fn shape_mismatch_is_rejected_before_use() {
        let spec: ModelSpec =
            serde_json::from_str(r#"{"kind": "linear", "intercept": 0.0, "coefficients": [1.0]}"#)
                .unwrap();
        assert!(spec.into_predictor(3).is_err());
    }
}
