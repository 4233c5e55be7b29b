//! Per-sector artifact loading with isolated failures.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, warn};
use wagecast_core::{LoadedSector, SectorRegistry, SectorSchema};
use wagecast_predict::ModelSpec;

use crate::{LoadError, SectorSource};

/// Load one sector's schema and model.
///
/// The directory and the model, encoder and feature files must exist; the
/// metadata file is optional.
pub fn load_sector(source: &SectorSource) -> Result<LoadedSector, LoadError> {
    if !source.dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(source.dir.clone()));
    }

    let model_path = source.model_path();
    let encoders_path = source.encoders_path();
    let features_path = source.features_path();
    for path in [&model_path, &encoders_path, &features_path] {
        if !path.exists() {
            return Err(LoadError::ArtifactNotFound(path.clone()));
        }
    }

    let features: Vec<String> = read_json(&features_path)?;
    let encoders: HashMap<String, Vec<String>> = read_json(&encoders_path)?;
    let metadata_path = source.metadata_path();
    let metadata: Map<String, Value> = if metadata_path.exists() {
        read_json(&metadata_path)?
    } else {
        Map::new()
    };

    let schema = SectorSchema::from_classes(features, encoders, metadata)?;

    let spec: ModelSpec = read_json(&model_path)?;
    let kind = spec.kind();
    let predictor = spec
        .into_predictor(schema.feature_count())
        .map_err(LoadError::Model)?;

    info!(
        sector = %source.sector,
        dir = %source.dir.display(),
        features = schema.feature_count(),
        categorical = schema.categorical_fields().count(),
        model = kind,
        "loaded sector model"
    );
    Ok(LoadedSector::new(schema, predictor))
}

/// Load every source independently and assemble the registry.
///
/// A failure in one sector is logged and recorded; it never affects another
/// sector and never aborts the process.
pub fn load_registry(sources: &[SectorSource]) -> SectorRegistry {
    let outcomes = sources.iter().map(|source| {
        let outcome = load_sector(source);
        if let Err(e) = &outcome {
            warn!(sector = %source.sector, error = %e, "sector unavailable");
        }
        (source.sector, outcome)
    });
    let registry = SectorRegistry::from_outcomes(outcomes);

    let available: Vec<&str> = registry
        .available_sectors()
        .iter()
        .map(|s| s.as_str())
        .collect();
    info!(?available, "model registry ready");
    registry
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;
    use tempfile::TempDir;
    use wagecast_core::{Sector, SectorStatus};

    use super::*;
    use crate::ArtifactFiles;

    fn write(dir: &Path, name: &str, value: &Value) {
        std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
    }

    /// Write a minimal, valid agriculture artifact set into `dir`.
    fn write_agriculture(dir: &Path) {
        let files = ArtifactFiles::for_sector(Sector::Agriculture);
        write(dir, &files.features, &json!(["age", "state", "skill_level"]));
        write(dir, &files.encoders, &json!({"state": ["KA", "MH", "UP"]}));
        write(
            dir,
            &files.model,
            &json!({"kind": "linear", "intercept": 200.0, "coefficients": [2.0, 10.0, 25.0]}),
        );
        write(dir, &files.metadata, &json!({"r2": 0.87, "trained_on": 12000}));
    }

    fn shipped_models() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models")
    }

    #[test]
    fn loads_complete_artifact_set() {
        let tmp = TempDir::new().unwrap();
        write_agriculture(tmp.path());

        let loaded = load_sector(&SectorSource::new(Sector::Agriculture, tmp.path())).unwrap();
        assert_eq!(loaded.schema.feature_order(), ["age", "state", "skill_level"]);
        assert_eq!(loaded.schema.vocabulary("state").unwrap().code("MH"), Some(1));
        assert_eq!(loaded.schema.metadata()["r2"], 0.87);
        assert_eq!(loaded.predictor.predict(&[30.0, 1.0, 2.0]).unwrap(), 320.0);
    }

    #[test]
    fn metadata_is_optional() {
        let tmp = TempDir::new().unwrap();
        write_agriculture(tmp.path());
        std::fs::remove_file(tmp.path().join("model_metadata.json")).unwrap();

        let loaded = load_sector(&SectorSource::new(Sector::Agriculture, tmp.path())).unwrap();
        assert!(loaded.schema.metadata().is_empty());
    }

    #[test]
    fn missing_directory_is_reported() {
        let tmp = TempDir::new().unwrap();
        let err = load_sector(&SectorSource::new(Sector::Agriculture, tmp.path().join("nope")))
            .unwrap_err();
        assert!(matches!(err, LoadError::DirectoryNotFound(_)));
    }

    #[test]
    fn missing_required_artifact_is_reported() {
        let tmp = TempDir::new().unwrap();
        write_agriculture(tmp.path());
        std::fs::remove_file(tmp.path().join("label_encoders.json")).unwrap();

        let err = load_sector(&SectorSource::new(Sector::Agriculture, tmp.path())).unwrap_err();
        match err {
            LoadError::ArtifactNotFound(path) => assert!(path.ends_with("label_encoders.json")),
            other => panic!("expected ArtifactNotFound, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_reported_with_path() {
        let tmp = TempDir::new().unwrap();
        write_agriculture(tmp.path());
        std::fs::write(tmp.path().join("feature_names.json"), b"[\"age\",").unwrap();

        let err = load_sector(&SectorSource::new(Sector::Agriculture, tmp.path())).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("feature_names.json"));
    }

    #[test]
    fn schema_violations_are_reported() {
        let tmp = TempDir::new().unwrap();
        write_agriculture(tmp.path());
        write(tmp.path(), "label_encoders.json", &json!({"district": ["Pune"]}));

        let err = load_sector(&SectorSource::new(Sector::Agriculture, tmp.path())).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn model_must_fit_feature_count() {
        let tmp = TempDir::new().unwrap();
        write_agriculture(tmp.path());
        write(
            tmp.path(),
            "xgboost_wage_model.json",
            &json!({"kind": "linear", "intercept": 0.0, "coefficients": [1.0]}),
        );

        let err = load_sector(&SectorSource::new(Sector::Agriculture, tmp.path())).unwrap_err();
        assert!(matches!(err, LoadError::Model(_)));
    }

    #[test]
    fn one_failing_sector_does_not_affect_another() {
        let tmp = TempDir::new().unwrap();
        let agri = tmp.path().join("agriculture");
        std::fs::create_dir(&agri).unwrap();
        write_agriculture(&agri);

        let registry = load_registry(&[
            SectorSource::new(Sector::Agriculture, &agri),
            SectorSource::new(Sector::Construction, tmp.path().join("construction")),
        ]);

        assert!(registry.is_loaded(Sector::Agriculture));
        assert!(!registry.is_loaded(Sector::Construction));
        assert!(matches!(
            registry.status(Sector::Construction),
            Some(SectorStatus::Unavailable { reason }) if reason.contains("not found")
        ));
    }

    #[test]
    fn shipped_models_load() {
        let root = shipped_models();
        let registry = load_registry(&[
            SectorSource::under(&root, Sector::Agriculture),
            SectorSource::under(&root, Sector::Construction),
        ]);
        assert_eq!(
            registry.available_sectors(),
            vec![Sector::Agriculture, Sector::Construction]
        );

        let construction = registry.schema_of(Sector::Construction).unwrap();
        assert!(construction.vocabulary("job_role").unwrap().contains("electrician"));
        assert!(!construction.vocabulary("job_role").unwrap().contains("plumber"));
    }
}
