//! Patient record shared by every classifier

use crate::config::WeightBand;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A patient as seen by the classifiers
///
/// `condition` is carried along with the record but no rule reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Patient {
    /// Display name, used in audit entries
    pub name: String,

    /// Body weight in kilograms (unrestricted)
    pub weight: f64,

    /// Free-text clinical condition
    #[serde(default)]
    pub condition: String,
}

impl Patient {
    pub fn new(name: impl Into<String>, weight: f64, condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            condition: condition.into(),
        }
    }

    /// True when the weight falls outside the closed band
    ///
    /// NaN never lies inside the band, so it counts as suspicious.
    pub fn has_suspicious_weight(&self, band: &WeightBand) -> bool {
        !(band.min_kg..=band.max_kg).contains(&self.weight)
    }
}
