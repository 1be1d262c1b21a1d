//! Body temperature analysis
//!
//! Readings may be given in Celsius or Fahrenheit. Fever thresholds depend
//! on age: infants (under 3 by default) use 37.4 °C, everyone else 39.4 °C.
//! In emergency mode a reading below 30 °C short-circuits to
//! `POSSIBLE HYPOTHERMIA`.

use crate::audit::AuditSink;
use crate::config::{ClassifierConfig, TemperatureThresholds};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::str::FromStr;

/// Temperature unit of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureScale {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl FromStr for TemperatureScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "C" => Ok(TemperatureScale::Celsius),
            "F" => Ok(TemperatureScale::Fahrenheit),
            _ => Err(Error::invalid("Scale must be 'C' or 'F'")),
        }
    }
}

/// Outcome of a temperature analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureStatus {
    #[serde(rename = "FEVER")]
    Fever,
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "POSSIBLE HYPOTHERMIA")]
    PossibleHypothermia,
}

impl TemperatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureStatus::Fever => "FEVER",
            TemperatureStatus::Normal => "NORMAL",
            TemperatureStatus::PossibleHypothermia => "POSSIBLE HYPOTHERMIA",
        }
    }
}

impl std::fmt::Display for TemperatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a Fahrenheit reading to Celsius
///
/// Values outside -100..=300 °F are rejected as unrealistic.
pub fn fahrenheit_to_celsius(temp_f: f64) -> Result<f64> {
    if !temp_f.is_finite() {
        return Err(Error::invalid("Temperature must be numeric"));
    }
    if !(-100.0..=300.0).contains(&temp_f) {
        return Err(Error::invalid("Unrealistic temperature value"));
    }
    Ok((temp_f - 32.0) * 5.0 / 9.0)
}

/// Fever check against the default 38 °C threshold
pub fn has_fever(temp_c: f64) -> bool {
    temp_c > TemperatureThresholds::default().low_fever_c
}

/// One analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRequest {
    pub temperature: f64,

    /// Age in years; fractional ages are allowed
    pub age: f64,

    #[serde(default)]
    pub scale: TemperatureScale,

    /// Write `Patient status: <STATUS>` to the output
    #[serde(default)]
    pub verbose: bool,

    /// Enable the hypothermia short-circuit
    #[serde(default)]
    pub emergency_mode: bool,

    /// Append a reading line to the audit sink
    #[serde(default)]
    pub log: bool,
}

impl TemperatureRequest {
    pub fn new(temperature: f64, age: f64, scale: TemperatureScale) -> Self {
        Self {
            temperature,
            age,
            scale,
            verbose: false,
            emergency_mode: false,
            log: false,
        }
    }
}

/// Shape of [`TemperatureAnalyzer::status_report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Long,
    /// First two characters of the status
    Code,
    WithTemperature,
}

/// Report on the last analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusReport {
    Long(String),
    Code(Option<String>),
    WithTemperature {
        status: Option<TemperatureStatus>,
        temp_celsius: Option<f64>,
    },
}

/// Temperature analyzer
///
/// Keeps the last status and the last Celsius value for
/// [`status_report`](Self::status_report).
#[derive(Debug, Clone, Default)]
pub struct TemperatureAnalyzer {
    thresholds: TemperatureThresholds,
    last_status: Option<TemperatureStatus>,
    last_celsius: Option<f64>,
}

impl TemperatureAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with custom thresholds, rejecting inconsistent ones
    pub fn with_thresholds(thresholds: TemperatureThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            ..Self::default()
        })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Self::with_thresholds(config.temperature.clone())
    }

    pub fn last_status(&self) -> Option<TemperatureStatus> {
        self.last_status
    }

    pub fn last_celsius(&self) -> Option<f64> {
        self.last_celsius
    }

    /// Analyze a reading, writing the verbose line to stdout
    pub fn analyze(
        &mut self,
        request: &TemperatureRequest,
        sink: Option<&dyn AuditSink>,
    ) -> Result<TemperatureStatus> {
        self.analyze_to(request, sink, &mut io::stdout().lock())
    }

    /// Same as [`analyze`](Self::analyze) with an explicit output writer
    pub fn analyze_to<W: Write + ?Sized>(
        &mut self,
        request: &TemperatureRequest,
        sink: Option<&dyn AuditSink>,
        out: &mut W,
    ) -> Result<TemperatureStatus> {
        let age = request.age;
        if !age.is_finite() || age < 0.0 {
            return Err(Error::invalid("Invalid age value"));
        }
        if !request.temperature.is_finite() {
            return Err(Error::invalid("Temperature must be numeric"));
        }

        let temp_c = match request.scale {
            TemperatureScale::Fahrenheit => fahrenheit_to_celsius(request.temperature)?,
            TemperatureScale::Celsius => request.temperature,
        };
        self.last_celsius = Some(temp_c);

        if request.emergency_mode && temp_c < self.thresholds.hypothermia_c {
            tracing::warn!(temp_c, "possible hypothermia");
            self.last_status = Some(TemperatureStatus::PossibleHypothermia);
            return Ok(TemperatureStatus::PossibleHypothermia);
        }

        let threshold = if age < self.thresholds.infant_age_years {
            self.thresholds.infant_fever_c
        } else {
            self.thresholds.high_fever_c
        };

        let status = if temp_c > threshold {
            TemperatureStatus::Fever
        } else {
            TemperatureStatus::Normal
        };
        tracing::debug!(temp_c, age, threshold, status = %status, "temperature analyzed");
        self.last_status = Some(status);

        if request.verbose {
            writeln!(out, "Patient status: {}", status)?;
        }

        if request.log {
            if let Some(sink) = sink {
                // Celsius keeps its fractional part even when whole: "TEMP=40.0"
                sink.append(&format!("TEMP={:?}, AGE={}, STATUS={}", temp_c, age, status));
            }
        }

        Ok(status)
    }

    /// Summarize the last analysis
    pub fn status_report(&self, format: ReportFormat) -> StatusReport {
        match format {
            ReportFormat::WithTemperature => StatusReport::WithTemperature {
                status: self.last_status,
                temp_celsius: self.last_celsius,
            },
            ReportFormat::Code => StatusReport::Code(
                self.last_status
                    .map(|s| s.as_str().chars().take(2).collect()),
            ),
            ReportFormat::Long => StatusReport::Long(format!(
                "Current status: {}",
                self.last_status.map_or("None", |s| s.as_str())
            )),
        }
    }
}
