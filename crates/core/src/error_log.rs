// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error log interface for failed job runs.

use parking_lot::Mutex;

/// Category every job failure is logged under.
pub const ERROR_LOG_CATEGORY: &str = "cronjobs-errors";

/// Sink for job failure messages.
pub trait ErrorLog: Send + Sync {
    fn log(&self, message: &str, category: &str);
}

/// Message logged when a job's callback fails.
pub fn format_job_error(job_name: &str, message: &str) -> String {
    format!("CronError in \"{}\": {}", job_name, message)
}

/// A logged entry, as captured by [`MemoryErrorLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub category: String,
    pub message: String,
}

/// [`ErrorLog`] that keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryErrorLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Entries logged under `category`.
    pub fn in_category(&self, category: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.category == category)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ErrorLog for MemoryErrorLog {
    fn log(&self, message: &str, category: &str) {
        self.entries.lock().push(LogEntry {
            category: category.to_string(),
            message: message.to_string(),
        });
    }
}
