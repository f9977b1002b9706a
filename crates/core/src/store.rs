// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent run store interface and the namespace-bound client jobs use.

use crate::record::RunRecord;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Store namespace used when none is configured.
pub const DEFAULT_STORE_NAMESPACE: &str = "CronJob";

/// Errors from run store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Namespaced key/value store of run records. Entries never expire.
///
/// Writes are last-write-wins per key.
pub trait RunStore: Send + Sync {
    /// Fetch a record. Entries that cannot be decoded read as `None`.
    fn get(&self, namespace: &str, key: &str) -> Result<Option<RunRecord>, StoreError>;

    /// Replace the record under `key` as a single write.
    fn save(&self, namespace: &str, key: &str, record: &RunRecord) -> Result<(), StoreError>;

    /// Remove one record, returning whether it existed.
    fn remove(&self, namespace: &str, key: &str) -> Result<bool, StoreError>;

    /// Keys present in a namespace, sorted.
    fn keys(&self, namespace: &str) -> Result<Vec<String>, StoreError>;

    /// Remove every record in a namespace, returning how many were removed.
    fn clear(&self, namespace: &str) -> Result<usize, StoreError>;

    fn count(&self, namespace: &str) -> Result<usize, StoreError> {
        Ok(self.keys(namespace)?.len())
    }
}

/// In-memory [`RunStore`]. Contents are lost with the process.
#[derive(Debug, Default)]
pub struct MemoryRunStore {
    entries: Mutex<HashMap<String, BTreeMap<String, RunRecord>>>,
}

impl MemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStore for MemoryRunStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<RunRecord>, StoreError> {
        Ok(self
            .entries
            .lock()
            .get(namespace)
            .and_then(|records| records.get(key))
            .cloned())
    }

    fn save(&self, namespace: &str, key: &str, record: &RunRecord) -> Result<(), StoreError> {
        self.entries
            .lock()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .entries
            .lock()
            .get_mut(namespace)
            .is_some_and(|records| records.remove(key).is_some()))
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries
            .lock()
            .get(namespace)
            .map(|records| records.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn clear(&self, namespace: &str) -> Result<usize, StoreError> {
        Ok(self
            .entries
            .lock()
            .remove(namespace)
            .map_or(0, |records| records.len()))
    }
}

/// A [`RunStore`] bound to one namespace.
///
/// Jobs persist through this client. Store failures are logged and never
/// surface to the job: a failed read behaves as a miss and a failed write
/// leaves the in-memory state authoritative.
#[derive(Clone)]
pub struct RunRecords {
    store: Arc<dyn RunStore>,
    namespace: String,
}

impl RunRecords {
    pub fn new(store: Arc<dyn RunStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// Client over the [`DEFAULT_STORE_NAMESPACE`].
    pub fn with_default_namespace(store: Arc<dyn RunStore>) -> Self {
        Self::new(store, DEFAULT_STORE_NAMESPACE)
    }

    /// Client over a fresh [`MemoryRunStore`].
    pub fn in_memory() -> Self {
        Self::with_default_namespace(Arc::new(MemoryRunStore::new()))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn store(&self) -> &Arc<dyn RunStore> {
        &self.store
    }

    pub fn load(&self, key: &str) -> Option<RunRecord> {
        match self.store.get(&self.namespace, key) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    namespace = %self.namespace,
                    key,
                    error = %e,
                    "failed to read run record",
                );
                None
            }
        }
    }

    pub fn persist(&self, key: &str, record: &RunRecord) {
        if let Err(e) = self.store.save(&self.namespace, key, record) {
            tracing::warn!(
                namespace = %self.namespace,
                key,
                error = %e,
                "failed to persist run record",
            );
        }
    }

    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.store.keys(&self.namespace)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.store.count(&self.namespace)
    }

    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.store.remove(&self.namespace, key)
    }

    /// Forget every job's run history in this namespace.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let removed = self.store.clear(&self.namespace)?;
        tracing::info!(namespace = %self.namespace, removed, "cleared run records");
        Ok(removed)
    }
}

impl std::fmt::Debug for RunRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunRecords")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
