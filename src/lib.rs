// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # vitalrules — decision rules for patient vital signs
//!
//! Each classifier is a flat rule table: validate the inputs, walk the
//! rules top to bottom, return the first match. Side effects are limited
//! to an injectable audit sink and an optional output line.
//!
//! ## Quick Start
//!
//! ```rust
//! use vitalrules::{MemoryLog, Patient, RespiratoryClassifier, RespiratoryStatus};
//!
//! let log = MemoryLog::new();
//! let patient = Patient::new("Ada", 72.5, "post-op");
//!
//! let mut classifier = RespiratoryClassifier::new();
//! let status = classifier.classify(&patient, 18, 86.0, &log)?;
//!
//! assert_eq!(status, RespiratoryStatus::LowOxygenFastBreathing);
//! assert_eq!(log.entries(), vec!["Processed Ada"]);
//! # Ok::<(), vitalrules::Error>(())
//! ```
//!
//! ## Classifiers
//!
//! | Classifier | Inputs | Output |
//! |------------|--------|--------|
//! | [`RespiratoryClassifier`] | respiration rate, SpO2 | [`RespiratoryStatus`] |
//! | [`FrequencyClassifier`] | respiration rate | [`FrequencyClass`] (code 0–3) |
//! | [`TemperatureAnalyzer`] | temperature, age, scale | [`TemperatureStatus`] |
//! | [`HydrationCalculator`] | weight, height, activity | liters per day |
//!
//! Thresholds come from [`ClassifierConfig`], which defaults to the
//! reference values and can be overridden from YAML.

pub mod audit;
pub mod config;
pub mod error;
pub mod frequency;
pub mod hydration;
pub mod patient;
pub mod respiratory;
pub mod temperature;

// Re-exports
pub use audit::{AuditEntry, AuditSink, FileLog, MemoryLog};
pub use config::{
    ClassifierConfig, FrequencyBands, HydrationFactors, RespiratoryThresholds,
    TemperatureThresholds, WeightBand,
};
pub use error::{Error, Result};
pub use frequency::{breathing_frequency, FrequencyClass, FrequencyClassifier};
pub use hydration::{daily_hydration_liters, ActivityLevel, HydrationCalculator};
pub use patient::Patient;
pub use respiratory::{respiratory_status, RespiratoryClassifier, RespiratoryStatus};
pub use temperature::{
    fahrenheit_to_celsius, has_fever, ReportFormat, StatusReport, TemperatureAnalyzer,
    TemperatureRequest, TemperatureScale, TemperatureStatus,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
