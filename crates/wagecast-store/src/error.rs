use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("model directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid schema: {0}")]
    Schema(#[from] wagecast_core::SchemaError),

    #[error("model does not fit schema: {0:#}")]
    Model(anyhow::Error),
}
