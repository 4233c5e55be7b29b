//! Artifact loading: reads each sector's feature list, vocabularies, metadata
//! and model from disk and assembles the immutable [`SectorRegistry`].
//!
//! [`SectorRegistry`]: wagecast_core::SectorRegistry

mod artifacts;
mod error;
mod loader;

pub use artifacts::{ArtifactFiles, SectorSource};
pub use error::LoadError;
pub use loader::{load_registry, load_sector};
