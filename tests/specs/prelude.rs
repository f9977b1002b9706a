//! Test helpers for behavioral specifications.
//!
//! A `Host` is what an application embedding cronjobs assembles: a
//! file-backed store, a signal bus, an error log and a dispatcher.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use cj_core::{Clock, FakeClock, Job, MemoryErrorLog, RunRecords, SharedJob};
use cj_engine::{Dispatcher, SignalBus};
use cj_storage::{FileRunStore, StoreConfig};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub struct Host {
    pub dir: TempDir,
    pub clock: FakeClock,
    pub bus: Arc<SignalBus>,
    pub errors: Arc<MemoryErrorLog>,
    pub dispatcher: Dispatcher,
    pub records: RunRecords,
}

impl Host {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            path: Some(dir.path().join("runs.json")),
            log_dir: Some(dir.path().join("logs")),
            ..StoreConfig::default()
        };
        Self::with_config(dir, &config)
    }

    pub fn with_config(dir: TempDir, config: &StoreConfig) -> Self {
        let bus = Arc::new(SignalBus::new());
        let errors = Arc::new(MemoryErrorLog::new());
        Self {
            records: config.open_records().unwrap(),
            dispatcher: Dispatcher::new(bus.clone(), errors.clone()),
            clock: FakeClock::new(),
            bus,
            errors,
            dir,
        }
    }

    /// Simulate a process restart: same state dir, fresh everything else.
    pub fn restart(self) -> Self {
        let clock = self.clock.clone();
        let config = StoreConfig {
            path: Some(self.runs_path()),
            log_dir: Some(self.dir.path().join("logs")),
            ..StoreConfig::default()
        };
        let mut host = Self::with_config(self.dir, &config);
        host.clock = clock;
        host
    }

    pub fn job(&self, name: &str) -> Job {
        Job::named(name, self.records.clone(), Arc::new(self.clock.clone()))
    }

    /// A shared job whose callback counts invocations.
    pub fn counting(&self, name: &str) -> (SharedJob, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut job = self.job(name);
        job.on_run(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (job.into_shared(), calls)
    }

    pub fn runs_path(&self) -> PathBuf {
        self.dir.path().join("runs.json")
    }

    /// The persisted run document as raw JSON.
    pub fn runs_json(&self) -> serde_json::Value {
        let text = std::fs::read_to_string(self.runs_path()).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    pub fn now_secs(&self) -> u64 {
        self.clock.epoch_secs()
    }

    pub fn reopen_store(&self) -> FileRunStore {
        FileRunStore::open(self.runs_path())
    }
}

pub fn invocations(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
