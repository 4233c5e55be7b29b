//! Where each sector's artifacts live on disk.

use std::path::{Path, PathBuf};

use wagecast_core::Sector;

/// File names of the four artifacts inside a sector's model directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFiles {
    pub model: String,
    pub encoders: String,
    pub features: String,
    /// Optional; a missing file yields empty metadata.
    pub metadata: String,
}

impl ArtifactFiles {
    /// Default file names shipped for a sector.
    pub fn for_sector(sector: Sector) -> Self {
        match sector {
            Sector::Agriculture => Self {
                model: "xgboost_wage_model.json".into(),
                encoders: "label_encoders.json".into(),
                features: "feature_names.json".into(),
                metadata: "model_metadata.json".into(),
            },
            Sector::Construction => Self {
                model: "construction_wage_model.json".into(),
                encoders: "construction_label_encoders.json".into(),
                features: "construction_feature_names.json".into(),
                metadata: "construction_model_metadata.json".into(),
            },
        }
    }
}

/// A sector plus the directory and file names to load it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorSource {
    pub sector: Sector,
    pub dir: PathBuf,
    pub files: ArtifactFiles,
}

impl SectorSource {
    /// Use the default file names inside `dir`.
    pub fn new(sector: Sector, dir: impl Into<PathBuf>) -> Self {
        Self {
            sector,
            dir: dir.into(),
            files: ArtifactFiles::for_sector(sector),
        }
    }

    /// Default location under a shared models root: `<root>/<sector>`.
    pub fn under(root: &Path, sector: Sector) -> Self {
        Self::new(sector, root.join(sector.as_str()))
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.files.model)
    }

    pub fn encoders_path(&self) -> PathBuf {
        self.dir.join(&self.files.encoders)
    }

    pub fn features_path(&self) -> PathBuf {
        self.dir.join(&self.files.features)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(&self.files.metadata)
    }
}
