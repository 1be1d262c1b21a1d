//! Classifier thresholds
//!
//! Every section defaults to the reference cut-offs, so a YAML file only
//! needs to name the values it overrides:
//!
//! ```yaml
//! weight:
//!   min_kg: 45
//! temperature:
//!   infant_age_years: 2
//! ```

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "vitalrules config", description = "Classifier thresholds")]
#[serde(default)]
pub struct ClassifierConfig {
    pub weight: WeightBand,
    pub respiratory: RespiratoryThresholds,
    pub frequency: FrequencyBands,
    pub temperature: TemperatureThresholds,
    pub hydration: HydrationFactors,
}

/// Soft band outside of which a weight is flagged for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WeightBand {
    pub min_kg: f64,
    pub max_kg: f64,
}

impl Default for WeightBand {
    fn default() -> Self {
        Self {
            min_kg: 50.0,
            max_kg: 120.0,
        }
    }
}

/// Cut-offs for the respiratory status rule chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RespiratoryThresholds {
    /// SpO2 percentage compared against in the first two rules
    pub oxygen_cutoff: f64,

    /// Breaths per minute above which breathing counts as fast
    pub fast_breathing_rate: i32,
}

impl Default for RespiratoryThresholds {
    fn default() -> Self {
        Self {
            oxygen_cutoff: 88.0,
            fast_breathing_rate: 15,
        }
    }
}

/// Breathing frequency buckets (breaths per minute)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FrequencyBands {
    /// Rates strictly above this are fast
    pub fast_above: i32,

    /// Lowest normal rate
    pub normal_min: i32,

    /// Lowest slow rate; anything positive below is suspicious
    pub slow_min: i32,
}

impl Default for FrequencyBands {
    fn default() -> Self {
        Self {
            fast_above: 20,
            normal_min: 12,
            slow_min: 6,
        }
    }
}

/// Body temperature thresholds, all in Celsius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TemperatureThresholds {
    pub low_fever_c: f64,
    pub high_fever_c: f64,
    pub infant_fever_c: f64,
    pub hypothermia_c: f64,

    /// Patients younger than this use `infant_fever_c`
    pub infant_age_years: f64,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            low_fever_c: 38.0,
            high_fever_c: 39.4,
            infant_fever_c: 37.4,
            hypothermia_c: 30.0,
            infant_age_years: 3.0,
        }
    }
}

/// Daily fluid requirement factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HydrationFactors {
    pub ml_per_kg: f64,
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl Default for HydrationFactors {
    fn default() -> Self {
        Self {
            ml_per_kg: 30.0,
            low: 0.9,
            mid: 1.0,
            high: 1.2,
        }
    }
}

impl ClassifierConfig {
    /// Parse config from YAML and validate it
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ClassifierConfig = serde_norway::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Load a YAML config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded classifier config");
        Ok(config)
    }

    /// JSON Schema of the config file format
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(ClassifierConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// Reject thresholds that would make the rule chains meaningless
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.weight.check(&mut errors);
        self.respiratory.check(&mut errors);
        self.frequency.check(&mut errors);
        self.temperature.check(&mut errors);
        self.hydration.check(&mut errors);
        into_result(errors)
    }
}

fn into_result(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(errors.join("; ")))
    }
}

impl WeightBand {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.check(&mut errors);
        into_result(errors)
    }

    fn check(&self, errors: &mut Vec<String>) {
        if !(self.min_kg <= self.max_kg) {
            errors.push(format!(
                "weight.min_kg ({}) must not exceed weight.max_kg ({})",
                self.min_kg, self.max_kg
            ));
        }
    }
}

impl RespiratoryThresholds {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.check(&mut errors);
        into_result(errors)
    }

    fn check(&self, errors: &mut Vec<String>) {
        let oxygen = self.oxygen_cutoff;
        if !(oxygen > 0.0 && oxygen <= 100.0) {
            errors.push(format!(
                "respiratory.oxygen_cutoff ({}) must lie in (0, 100]",
                oxygen
            ));
        }
    }
}

impl FrequencyBands {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.check(&mut errors);
        into_result(errors)
    }

    fn check(&self, errors: &mut Vec<String>) {
        if !(0 < self.slow_min && self.slow_min <= self.normal_min && self.normal_min <= self.fast_above) {
            errors.push(format!(
                "frequency bands must satisfy 0 < slow_min ({}) <= normal_min ({}) <= fast_above ({})",
                self.slow_min, self.normal_min, self.fast_above
            ));
        }
    }
}

impl TemperatureThresholds {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.check(&mut errors);
        into_result(errors)
    }

    fn check(&self, errors: &mut Vec<String>) {
        if !(self.infant_age_years >= 0.0) {
            errors.push("temperature.infant_age_years must be non-negative".into());
        }
        if !(self.hypothermia_c < self.infant_fever_c && self.hypothermia_c < self.high_fever_c) {
            errors.push("temperature.hypothermia_c must be below both fever thresholds".into());
        }
    }
}

impl HydrationFactors {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.check(&mut errors);
        into_result(errors)
    }

    fn check(&self, errors: &mut Vec<String>) {
        for (name, value) in [
            ("ml_per_kg", self.ml_per_kg),
            ("low", self.low),
            ("mid", self.mid),
            ("high", self.high),
        ] {
            if !(value > 0.0) {
                errors.push(format!("hydration.{} ({}) must be positive", name, value));
            }
        }
    }
}
