//! Respiratory status classification
//!
//! Combines oxygen saturation (SpO2) and respiration rate into one of four
//! statuses. Rules are evaluated top to bottom, first match wins:
//!
//! | rule | when | then |
//! |------|------|------|
//! | `low_o2_fast` | `spo2 < 88 && rate > 15` | `LOW O2 + FAST BREATHING` |
//! | `low_o2` | `spo2 > 88` | `LOW O2` |
//! | `fast` | `rate > 15` | `FAST BREATHING` |
//! | `normal` | otherwise | `NORMAL` |
//!
//! The `low_o2` rule fires on *high* saturation and `spo2 == 88` matches
//! neither of the first two rules. Both are reproduced as-is; see DESIGN.md.

use crate::audit::AuditSink;
use crate::config::{ClassifierConfig, RespiratoryThresholds, WeightBand};
use crate::error::{Error, Result};
use crate::patient::Patient;
use serde::{Deserialize, Serialize};

/// Outcome of the respiratory rule chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RespiratoryStatus {
    #[serde(rename = "LOW O2 + FAST BREATHING")]
    LowOxygenFastBreathing,
    #[serde(rename = "LOW O2")]
    LowOxygen,
    #[serde(rename = "FAST BREATHING")]
    FastBreathing,
    #[serde(rename = "NORMAL")]
    Normal,
}

impl RespiratoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RespiratoryStatus::LowOxygenFastBreathing => "LOW O2 + FAST BREATHING",
            RespiratoryStatus::LowOxygen => "LOW O2",
            RespiratoryStatus::FastBreathing => "FAST BREATHING",
            RespiratoryStatus::Normal => "NORMAL",
        }
    }

    /// Identifier of the rule that produces this status
    pub fn rule_id(&self) -> &'static str {
        match self {
            RespiratoryStatus::LowOxygenFastBreathing => "low_o2_fast",
            RespiratoryStatus::LowOxygen => "low_o2",
            RespiratoryStatus::FastBreathing => "fast",
            RespiratoryStatus::Normal => "normal",
        }
    }
}

impl std::fmt::Display for RespiratoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule chain with the reference thresholds. No validation, no side effects.
pub fn respiratory_status(respiration_rate: i32, oxygen_saturation: f64) -> RespiratoryStatus {
    evaluate(
        &RespiratoryThresholds::default(),
        respiration_rate,
        oxygen_saturation,
    )
}

fn evaluate(
    thresholds: &RespiratoryThresholds,
    respiration_rate: i32,
    oxygen_saturation: f64,
) -> RespiratoryStatus {
    let cutoff = thresholds.oxygen_cutoff;
    let fast = respiration_rate > thresholds.fast_breathing_rate;

    if oxygen_saturation < cutoff && fast {
        RespiratoryStatus::LowOxygenFastBreathing
    } else if oxygen_saturation > cutoff {
        RespiratoryStatus::LowOxygen
    } else if fast {
        RespiratoryStatus::FastBreathing
    } else {
        RespiratoryStatus::Normal
    }
}

/// Hard input checks. NaN saturation is outside `(0, 100]` and rejected.
fn validate(respiration_rate: i32, oxygen_saturation: f64) -> Result<()> {
    if respiration_rate <= 0 {
        return Err(Error::invalid(format!(
            "respiration rate must be positive, got {}",
            respiration_rate
        )));
    }
    if !(oxygen_saturation > 0.0 && oxygen_saturation <= 100.0) {
        return Err(Error::invalid(format!(
            "oxygen saturation must lie in (0, 100], got {}",
            oxygen_saturation
        )));
    }
    Ok(())
}

/// Respiratory classifier
///
/// Remembers the status of the last successful call.
#[derive(Debug, Clone, Default)]
pub struct RespiratoryClassifier {
    thresholds: RespiratoryThresholds,
    weight_band: WeightBand,
    last_status: Option<RespiratoryStatus>,
}

impl RespiratoryClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with custom thresholds, rejecting an invalid band or cutoff
    pub fn with_config(thresholds: RespiratoryThresholds, weight_band: WeightBand) -> Result<Self> {
        thresholds.validate()?;
        weight_band.validate()?;
        Ok(Self {
            thresholds,
            weight_band,
            last_status: None,
        })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Self::with_config(config.respiratory.clone(), config.weight.clone())
    }

    /// Status from the most recent successful [`classify`](Self::classify)
    pub fn last_status(&self) -> Option<RespiratoryStatus> {
        self.last_status
    }

    /// Classify a patient's respiratory status
    ///
    /// The suspicious-weight entry is written before inputs are validated,
    /// so it stays in `sink` even when the call is rejected. A successful
    /// call also appends `Processed <name>`.
    pub fn classify(
        &mut self,
        patient: &Patient,
        respiration_rate: i32,
        oxygen_saturation: f64,
        sink: &dyn AuditSink,
    ) -> Result<RespiratoryStatus> {
        if patient.has_suspicious_weight(&self.weight_band) {
            tracing::warn!(patient = %patient.name, weight = patient.weight, "suspicious weight");
            sink.append(&format!("Suspicious weight for {}", patient.name));
        }

        validate(respiration_rate, oxygen_saturation)?;

        let status = evaluate(&self.thresholds, respiration_rate, oxygen_saturation);
        tracing::debug!(
            patient = %patient.name,
            respiration_rate,
            oxygen_saturation,
            rule = status.rule_id(),
            "respiratory status classified"
        );

        self.last_status = Some(status);
        sink.append(&format!("Processed {}", patient.name));
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryLog;

    fn patient(weight: f64) -> Patient {
        Patient::new("Ada", weight, "asthma")
    }

    #[test]
    fn test_rule_chain() {
        assert_eq!(respiratory_status(16, 87.0), RespiratoryStatus::LowOxygenFastBreathing);
        assert_eq!(respiratory_status(10, 95.0), RespiratoryStatus::LowOxygen);
        assert_eq!(respiratory_status(16, 89.0), RespiratoryStatus::LowOxygen);
        assert_eq!(respiratory_status(16, 88.0), RespiratoryStatus::FastBreathing);
        assert_eq!(respiratory_status(15, 88.0), RespiratoryStatus::Normal);
        assert_eq!(respiratory_status(10, 80.0), RespiratoryStatus::Normal);
    }

    #[test]
    fn test_success_logs_processed_and_sets_last_status() {
        let log = MemoryLog::new();
        let mut classifier = RespiratoryClassifier::new();
        assert_eq!(classifier.last_status(), None);

        let status = classifier.classify(&patient(70.0), 16, 87.0, &log).unwrap();
        assert_eq!(status, RespiratoryStatus::LowOxygenFastBreathing);
        assert_eq!(classifier.last_status(), Some(status));
        assert_eq!(log.entries(), vec!["Processed Ada"]);
    }

    #[test]
    fn test_rejection_keeps_weight_entry_and_last_status() {
        let log = MemoryLog::new();
        let mut classifier = RespiratoryClassifier::new();
        classifier.classify(&patient(70.0), 10, 80.0, &log).unwrap();

        let err = classifier.classify(&patient(130.0), 0, 95.0, &log).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(classifier.last_status(), Some(RespiratoryStatus::Normal));
        assert_eq!(
            log.entries(),
            vec!["Processed Ada", "Suspicious weight for Ada"]
        );
    }

    #[test]
    fn test_nan_saturation_rejected() {
        let log = MemoryLog::new();
        let mut classifier = RespiratoryClassifier::new();
        assert!(classifier.classify(&patient(70.0), 12, f64::NAN, &log).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let log = MemoryLog::new();
        let thresholds = RespiratoryThresholds {
            oxygen_cutoff: 92.0,
            fast_breathing_rate: 20,
        };
        let mut classifier =
            RespiratoryClassifier::with_config(thresholds, WeightBand::default()).unwrap();
        assert_eq!(
            classifier.classify(&patient(70.0), 18, 90.0, &log).unwrap(),
            RespiratoryStatus::Normal
        );
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let inverted = WeightBand {
            min_kg: 120.0,
            max_kg: 50.0,
        };
        let err = RespiratoryClassifier::with_config(RespiratoryThresholds::default(), inverted)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let cutoff = RespiratoryThresholds {
            oxygen_cutoff: 0.0,
            fast_breathing_rate: 15,
        };
        assert!(RespiratoryClassifier::with_config(cutoff, WeightBand::default()).is_err());
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&RespiratoryStatus::LowOxygenFastBreathing).unwrap();
        assert_eq!(json, r#""LOW O2 + FAST BREATHING""#);
        assert_eq!(RespiratoryStatus::FastBreathing.to_string(), "FAST BREATHING");
    }
}
