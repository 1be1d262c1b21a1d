//! Audit trail sinks
//!
//! Classifiers write human-readable audit lines ("Processed Ada",
//! "Suspicious weight for Ada", ...) to whatever [`AuditSink`] the caller
//! hands them. Sinks are append-only: nothing in this crate removes or
//! reorders an entry once written.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Append-only destination for audit entries
pub trait AuditSink: Send + Sync {
    fn append(&self, entry: &str);
}

impl<T: AuditSink + ?Sized> AuditSink for &T {
    fn append(&self, entry: &str) {
        (**self).append(entry)
    }
}

impl<T: AuditSink + ?Sized> AuditSink for Arc<T> {
    fn append(&self, entry: &str) {
        (**self).append(entry)
    }
}

/// One recorded audit line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// In-memory audit log, safe to share between threads
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in append order
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    /// Full records including timestamps
    pub fn records(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Count of entries equal to `message`
    pub fn count(&self, message: &str) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.message == message)
            .count()
    }
}

impl AuditSink for MemoryLog {
    fn append(&self, entry: &str) {
        self.entries.lock().push(AuditEntry {
            message: entry.to_string(),
            timestamp: Utc::now(),
        });
    }
}

/// Audit log that appends one line per entry to a file
///
/// Write failures are reported through `tracing` and otherwise ignored, so
/// a broken log file never fails a classification.
#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_append(&self, entry: &str) -> std::io::Result<()> {
        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry)
    }
}

impl AuditSink for FileLog {
    fn append(&self, entry: &str) {
        if let Err(e) = self.try_append(entry) {
            tracing::warn!(path = %self.path.display(), error = %e, "audit log write failed");
        }
    }
}
