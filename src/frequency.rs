//! Breathing frequency buckets

use crate::config::{ClassifierConfig, FrequencyBands};
use crate::error::{Error, Result};
use crate::patient::Patient;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Frequency bucket. The discriminant is the integer code callers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyClass {
    Normal = 0,
    Slow = 1,
    Suspicious = 2,
    Fast = 3,
}

impl FrequencyClass {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FrequencyClass::Normal),
            1 => Some(FrequencyClass::Slow),
            2 => Some(FrequencyClass::Suspicious),
            3 => Some(FrequencyClass::Fast),
            _ => None,
        }
    }
}

impl std::fmt::Display for FrequencyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyClass::Normal => write!(f, "normal"),
            FrequencyClass::Slow => write!(f, "slow"),
            FrequencyClass::Suspicious => write!(f, "suspicious"),
            FrequencyClass::Fast => write!(f, "fast"),
        }
    }
}

/// Bucket a positive rate with the reference bands
pub fn breathing_frequency(respiration_rate: i32) -> FrequencyClass {
    bucket(&FrequencyBands::default(), respiration_rate)
}

fn bucket(bands: &FrequencyBands, respiration_rate: i32) -> FrequencyClass {
    if respiration_rate > bands.fast_above {
        FrequencyClass::Fast
    } else if respiration_rate >= bands.normal_min {
        FrequencyClass::Normal
    } else if respiration_rate >= bands.slow_min {
        FrequencyClass::Slow
    } else {
        FrequencyClass::Suspicious
    }
}

/// Breathing frequency classifier
#[derive(Debug, Clone, Default)]
pub struct FrequencyClassifier {
    bands: FrequencyBands,
}

impl FrequencyClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with custom bands, rejecting overlapping or non-positive ones
    pub fn with_bands(bands: FrequencyBands) -> Result<Self> {
        bands.validate()?;
        Ok(Self { bands })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Self::with_bands(config.frequency.clone())
    }

    /// Classify and, if `print` is set, write the result line to stdout
    pub fn classify(
        &self,
        patient: &Patient,
        respiration_rate: i32,
        print: bool,
    ) -> Result<FrequencyClass> {
        self.classify_to(patient, respiration_rate, print, &mut io::stdout().lock())
    }

    /// Same as [`classify`](Self::classify) with an explicit output writer
    pub fn classify_to<W: Write + ?Sized>(
        &self,
        patient: &Patient,
        respiration_rate: i32,
        print: bool,
        out: &mut W,
    ) -> Result<FrequencyClass> {
        if respiration_rate <= 0 {
            return Err(Error::invalid(format!(
                "respiration rate must be positive, got {}",
                respiration_rate
            )));
        }

        let class = bucket(&self.bands, respiration_rate);
        tracing::debug!(patient = %patient.name, respiration_rate, class = %class, "breathing frequency classified");

        if print {
            writeln!(out, "Class result={} for {}", class.code(), patient.name)?;
        }

        Ok(class)
    }
}
