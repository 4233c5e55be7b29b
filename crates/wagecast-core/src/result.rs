//! Prediction output and derived period estimates.

use serde::Serialize;

use crate::sector::Sector;
use crate::value::InputData;

/// Working days per month used for the monthly estimate.
pub const WORKING_DAYS_PER_MONTH: f64 = 26.0;
/// Working days per year used for the annual estimate (26 × 12).
pub const WORKING_DAYS_PER_YEAR: f64 = 312.0;

/// A successful wage prediction for one worker record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_wage: f64,
    pub sector: Sector,
    pub monthly_estimate: f64,
    pub annual_estimate: f64,
    /// The request's field mapping before any trimming.
    pub input_data: InputData,
}

impl PredictionResult {
    /// Build a result from a raw model output.
    ///
    /// Negative outputs are floored at zero, the daily wage is rounded to
    /// cents, and each period estimate is derived from the rounded wage and
    /// rounded independently.
    pub fn from_raw(sector: Sector, raw: f64, input_data: InputData) -> Self {
        let predicted_wage = round2(raw.max(0.0));
        Self {
            predicted_wage,
            sector,
            monthly_estimate: round2(predicted_wage * WORKING_DAYS_PER_MONTH),
            annual_estimate: round2(predicted_wage * WORKING_DAYS_PER_YEAR),
            input_data,
        }
    }

    /// Whether the wage and both estimates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.predicted_wage.is_finite()
            && self.monthly_estimate.is_finite()
            && self.annual_estimate.is_finite()
    }
}

/// Round to two decimal places, ties to even.
pub fn round2(x: f64) -> f64 {
    let rounded = (x * 100.0).round_ties_even() / 100.0;
    // Avoid emitting -0.0.
    if rounded == 0.0 { 0.0 } else { rounded }
}
