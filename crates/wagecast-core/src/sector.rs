//! Labour-market sectors served by Wagecast.
//!
//! The set is closed: each sector has its own model, schema and sample
//! record. Client strings are matched exactly against [`Sector::as_str`].

use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::value::InputData;

/// A named labour-market domain with its own model and schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Agriculture,
    Construction,
}

impl Sector {
    /// Every known sector, in reporting order.
    pub const ALL: [Sector; 2] = [Sector::Agriculture, Sector::Construction];

    /// Wire identifier (`"agriculture"`, `"construction"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agriculture => "agriculture",
            Self::Construction => "construction",
        }
    }

    /// Parse a wire identifier. Matching is exact; callers normalise case first.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sector| sector.as_str() == s)
    }

    /// Human-readable name shown by `/api/config`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Agriculture => "Agriculture",
            Self::Construction => "Construction",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Agriculture => "🌾",
            Self::Construction => "🏗️",
        }
    }

    /// Built-in worker record used by `/api/test/<sector>`.
    pub fn sample_input(&self) -> InputData {
        let record = match self {
            Self::Agriculture => json!({
                "age": 35,
                "experience_years": 15,
                "education_level": "secondary",
                "occupation": "tractor operator",
                "skill_level": 3,
                "state": "MH",
                "working_hours": 9,
                "employment_type": "permanent"
            }),
            Self::Construction => json!({
                "age": 32,
                "experience_years": 10,
                "education_level": "diploma",
                "job_role": "electrician",
                "skill_level": 3,
                "city_tier": "Metro",
                "working_hours": 8,
                "employment_type": "contract",
                "project_type": "commercial"
            }),
        };
        match record {
            serde_json::Value::Object(map) => map,
            _ => InputData::new(),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_wire_names() {
        for sector in Sector::ALL {
            assert_eq!(Sector::parse(sector.as_str()), Some(sector));
        }
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(Sector::parse("Agriculture"), None);
        assert_eq!(Sector::parse(" agriculture"), None);
        assert_eq!(Sector::parse("mining"), None);
    }

    #[test]
    fn sample_records_cover_expected_fields() {
        let agri = Sector::Agriculture.sample_input();
        assert_eq!(agri.len(), 8);
        assert_eq!(agri["occupation"], "tractor operator");

        let cons = Sector::Construction.sample_input();
        assert_eq!(cons.len(), 9);
        assert_eq!(cons["job_role"], "electrician");
        assert_eq!(cons["city_tier"], "Metro");
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Sector::Construction).unwrap();
        assert_eq!(json, "\"construction\"");
    }
}
