//! Immutable per-sector registry of loaded artifacts.
//!
//! Built once at startup from one load outcome per sector. A sector whose
//! load failed is recorded as [`SectorStatus::Unavailable`] with the reason;
//! it is never represented as an empty schema. The registry is read-only
//! afterwards and is shared between requests behind an `Arc` without locks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::capability::Predictor;
use crate::schema::SectorSchema;
use crate::sector::Sector;

/// A sector whose artifacts loaded successfully.
#[derive(Clone)]
pub struct LoadedSector {
    pub schema: SectorSchema,
    pub predictor: Arc<dyn Predictor>,
}

impl LoadedSector {
    pub fn new(schema: SectorSchema, predictor: Arc<dyn Predictor>) -> Self {
        Self { schema, predictor }
    }
}

impl fmt::Debug for LoadedSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedSector")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Load state of one sector.
#[derive(Debug, Clone)]
pub enum SectorStatus {
    Loaded(LoadedSector),
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct SectorRegistry {
    sectors: HashMap<Sector, SectorStatus>,
}

impl SectorRegistry {
    /// Build a registry from independent per-sector load outcomes.
    ///
    /// Known sectors with no outcome are recorded as unavailable.
    pub fn from_outcomes<E: fmt::Display>(
        outcomes: impl IntoIterator<Item = (Sector, Result<LoadedSector, E>)>,
    ) -> Self {
        let mut sectors: HashMap<Sector, SectorStatus> = outcomes
            .into_iter()
            .map(|(sector, outcome)| {
                let status = match outcome {
                    Ok(loaded) => SectorStatus::Loaded(loaded),
                    Err(e) => SectorStatus::Unavailable {
                        reason: e.to_string(),
                    },
                };
                (sector, status)
            })
            .collect();

        for sector in Sector::ALL {
            sectors
                .entry(sector)
                .or_insert_with(|| SectorStatus::Unavailable {
                    reason: "no artifacts configured".to_string(),
                });
        }

        Self { sectors }
    }

    /// Start from an all-unavailable registry and add loaded sectors; used by tests
    /// and embedders that construct models in code.
    pub fn with_sector(mut self, sector: Sector, loaded: LoadedSector) -> Self {
        self.sectors.insert(sector, SectorStatus::Loaded(loaded));
        self
    }

    /// A registry in which every known sector is unavailable.
    pub fn empty() -> Self {
        Self::from_outcomes(std::iter::empty::<(Sector, Result<LoadedSector, String>)>())
    }

    pub fn is_loaded(&self, sector: Sector) -> bool {
        self.loaded(sector).is_some()
    }

    pub fn loaded(&self, sector: Sector) -> Option<&LoadedSector> {
        match self.sectors.get(&sector) {
            Some(SectorStatus::Loaded(loaded)) => Some(loaded),
            _ => None,
        }
    }

    pub fn schema_of(&self, sector: Sector) -> Option<&SectorSchema> {
        self.loaded(sector).map(|l| &l.schema)
    }

    pub fn status(&self, sector: Sector) -> Option<&SectorStatus> {
        self.sectors.get(&sector)
    }

    /// Loaded sectors, in [`Sector::ALL`] order.
    pub fn available_sectors(&self) -> Vec<Sector> {
        Sector::ALL
            .into_iter()
            .filter(|s| self.is_loaded(*s))
            .collect()
    }
}
