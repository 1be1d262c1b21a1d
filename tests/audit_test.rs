//! Audit sinks shared across calls and threads

use std::sync::Arc;
use vitalrules::{AuditSink, FileLog, MemoryLog, Patient, RespiratoryClassifier};

#[test]
fn test_concurrent_classifiers_lose_no_entries() {
    let log = Arc::new(MemoryLog::new());
    let threads = 8;
    let calls = 250;

    std::thread::scope(|scope| {
        for t in 0..threads {
            let log = Arc::clone(&log);
            scope.spawn(move || {
                let mut classifier = RespiratoryClassifier::new();
                let patient = Patient::new(format!("p{}", t), 70.0, "");
                for _ in 0..calls {
                    classifier.classify(&patient, 14, 96.0, &log).unwrap();
                }
            });
        }
    });

    assert_eq!(log.len(), threads * calls);
    for t in 0..threads {
        assert_eq!(log.count(&format!("Processed p{}", t)), calls);
    }
}

#[test]
fn test_per_thread_order_is_preserved() {
    let log = Arc::new(MemoryLog::new());

    std::thread::scope(|scope| {
        for t in 0..4 {
            let log = Arc::clone(&log);
            scope.spawn(move || {
                for i in 0..100 {
                    log.append(&format!("{}:{}", t, i));
                }
            });
        }
    });

    let entries = log.entries();
    for t in 0..4 {
        let prefix = format!("{}:", t);
        let seq: Vec<usize> = entries
            .iter()
            .filter_map(|e| e.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(seq, (0..100).collect::<Vec<_>>());
    }
}

#[test]
fn test_file_log_as_classifier_sink() {
    let dir = tempfile::tempdir().unwrap();
    let log = FileLog::new(dir.path().join("audit.log"));
    let mut classifier = RespiratoryClassifier::new();

    classifier
        .classify(&Patient::new("Kim", 140.0, ""), 12, 97.0, &log)
        .unwrap();

    let content = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(content, "Suspicious weight for Kim\nProcessed Kim\n");
}
