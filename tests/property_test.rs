//! Property-based tests for the classifiers
//!
//! Uses proptest to check the "for all inputs" guarantees

use proptest::prelude::*;
use vitalrules::{
    breathing_frequency, respiratory_status, MemoryLog, Patient, RespiratoryClassifier,
};

proptest! {
    #[test]
    fn test_in_band_weight_never_flagged(weight in 50.0f64..=120.0, rate in 1i32..60, spo2 in 1.0f64..=100.0) {
        let log = MemoryLog::new();
        let mut classifier = RespiratoryClassifier::new();
        classifier.classify(&Patient::new("p", weight, ""), rate, spo2, &log).unwrap();
        prop_assert_eq!(log.count("Suspicious weight for p"), 0);
    }

    #[test]
    fn test_out_of_band_weight_flagged_once(
        weight in prop_oneof![-500.0f64..49.999, 120.001f64..1000.0],
        rate in -5i32..60,
    ) {
        let log = MemoryLog::new();
        let mut classifier = RespiratoryClassifier::new();
        // Flagged whether or not the rest of the input is accepted
        let _ = classifier.classify(&Patient::new("p", weight, ""), rate, 95.0, &log);
        prop_assert_eq!(log.count("Suspicious weight for p"), 1);
    }

    #[test]
    fn test_status_ignores_weight_and_condition(
        weight in -200.0f64..400.0,
        condition in ".*",
        rate in 1i32..200,
        spo2 in 0.01f64..=100.0,
    ) {
        let log = MemoryLog::new();
        let mut classifier = RespiratoryClassifier::new();
        let status = classifier
            .classify(&Patient::new("p", weight, condition), rate, spo2, &log)
            .unwrap();
        prop_assert_eq!(status, respiratory_status(rate, spo2));
    }

    #[test]
    fn test_classification_is_repeatable(rate in 1i32..200, spo2 in 0.01f64..=100.0) {
        let log = MemoryLog::new();
        let mut classifier = RespiratoryClassifier::new();
        let patient = Patient::new("p", 70.0, "");
        let first = classifier.classify(&patient, rate, spo2, &log).unwrap();
        let second = classifier.classify(&patient, rate, spo2, &log).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_frequency_code_in_range(rate in 1i32..i32::MAX) {
        let code = breathing_frequency(rate).code();
        prop_assert!((0..=3).contains(&code));
    }
}
