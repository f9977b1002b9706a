// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{FakeClock, Job, MemoryRunStore, RunRecord, RunRecords, RunStore};
use std::sync::Arc;

/// A memory-backed store and fake clock that jobs are built against.
pub struct TestJobs {
    pub store: Arc<MemoryRunStore>,
    pub records: RunRecords,
    pub clock: FakeClock,
}

impl TestJobs {
    pub fn new() -> Self {
        let store = Arc::new(MemoryRunStore::new());
        let records = RunRecords::with_default_namespace(store.clone());
        Self {
            store,
            records,
            clock: FakeClock::new(),
        }
    }

    /// Fresh unnamed job.
    pub fn unnamed(&self) -> Job {
        Job::new(self.records.clone(), Arc::new(self.clock.clone()))
    }

    /// Job with `name` assigned.
    pub fn job(&self, name: &str) -> Job {
        Job::named(name, self.records.clone(), Arc::new(self.clock.clone()))
    }

    /// Record stored under `key` in the default namespace.
    pub fn stored(&self, key: &str) -> Option<RunRecord> {
        self.store
            .get(self.records.namespace(), key)
            .ok()
            .flatten()
    }

    /// Seed a record as if written by an earlier process.
    pub fn seed(&self, key: &str, record: RunRecord) {
        self.records.persist(key, &record);
    }

    /// Current fake time in Unix seconds.
    pub fn now_secs(&self) -> u64 {
        crate::Clock::epoch_secs(&self.clock)
    }
}

impl Default for TestJobs {
    fn default() -> Self {
        Self::new()
    }
}
