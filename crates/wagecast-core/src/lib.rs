//! Core types for Wagecast: sectors, schemas, typed feature values, and the sector registry.

pub mod capability;
pub mod registry;
pub mod result;
pub mod schema;
pub mod sector;
pub mod value;

pub use capability::Predictor;
pub use registry::{LoadedSector, SectorRegistry, SectorStatus};
pub use result::{PredictionResult, round2};
pub use schema::{SchemaError, SectorSchema, Vocabulary};
pub use sector::Sector;
pub use value::{FeatureValue, InputData, PredictionRequest};
