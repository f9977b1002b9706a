// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed run store.
//!
//! All namespaces live in one JSON document:
//!
//! ```text
//! { "CronJob": { "SendDigest": [1700000000, 2, ""] } }
//! ```
//!
//! Every operation re-reads the file so that several processes sharing it
//! see each other's writes. Read-modify-write cycles hold an exclusive
//! advisory lock on a sibling `.lock` file, so concurrent writers to
//! different keys never drop each other's records. Each write replaces the
//! file atomically (write to a per-writer temp file, fsync, rename). A
//! corrupt file is moved to a `.bak` and treated as empty.

use cj_core::{RunRecord, RunStore, StoreError};
use fs2::FileExt;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

type Document = BTreeMap<String, BTreeMap<String, Value>>;

/// [`RunStore`] persisted to a JSON file.
#[derive(Debug)]
pub struct FileRunStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileRunStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the advisory lock file guarding the document.
    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Take the cross-process lock. Released when the returned file drops.
    fn lock_document(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;
        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }

    fn tmp_path(&self) -> PathBuf {
        let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_extension(format!("{}.{n}.tmp", std::process::id()))
    }

    fn load(&self) -> Result<Document, StoreError> {
        if !self.path.exists() {
            return Ok(Document::new());
        }

        let file = File::open(&self.path)?;
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(document) => Ok(document),
            Err(e) => {
                let bak_path = rotate_bak_path(&self.path);
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    bak = %bak_path.display(),
                    "Corrupt run store, moving to .bak and starting fresh",
                );
                fs::rename(&self.path, &bak_path)?;
                Ok(Document::new())
            }
        }
    }

    fn write(&self, document: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.tmp_path();
        let written = replace_with(&tmp_path, &self.path, document);
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }
}

impl RunStore for FileRunStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<RunRecord>, StoreError> {
        let _guard = self.lock.lock();
        if !self.path.exists() {
            return Ok(None);
        }
        let _file_lock = self.lock_document()?;
        let document = self.load()?;
        let Some(value) = document.get(namespace).and_then(|records| records.get(key)) else {
            return Ok(None);
        };

        match RunRecord::try_from(value.clone()) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(namespace, key, error = %e, "ignoring malformed run record");
                Ok(None)
            }
        }
    }

    fn save(&self, namespace: &str, key: &str, record: &RunRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let _file_lock = self.lock_document()?;
        let mut document = self.load()?;
        document
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), serde_json::to_value(record)?);
        self.write(&document)
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock();
        if !self.path.exists() {
            return Ok(false);
        }
        let _file_lock = self.lock_document()?;
        let mut document = self.load()?;
        let removed = document
            .get_mut(namespace)
            .is_some_and(|records| records.remove(key).is_some());
        if removed {
            self.write(&document)?;
        }
        Ok(removed)
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        let _guard = self.lock.lock();
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let _file_lock = self.lock_document()?;
        Ok(self
            .load()?
            .get(namespace)
            .map(|records| records.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn clear(&self, namespace: &str) -> Result<usize, StoreError> {
        let _guard = self.lock.lock();
        if !self.path.exists() {
            return Ok(0);
        }
        let _file_lock = self.lock_document()?;
        let mut document = self.load()?;
        let removed = document.remove(namespace).map_or(0, |records| records.len());
        if removed > 0 {
            self.write(&document)?;
        }
        Ok(removed)
    }
}

/// Write `document` to `tmp_path`, fsync, then rename over `path`.
fn replace_with(tmp_path: &Path, path: &Path, document: &Document) -> Result<(), StoreError> {
    let file = File::create(tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

const MAX_BAK_FILES: u32 = 3;

fn bak_path(path: &Path, n: u32) -> PathBuf {
    match n {
        1 => path.with_extension("bak"),
        n => path.with_extension(format!("bak.{n}")),
    }
}

/// Shift existing backups one slot older and return the freed `.bak` slot.
///
/// `.bak` is the newest, `.bak.{MAX_BAK_FILES}` the oldest; the rename into
/// the last slot replaces whatever was there.
fn rotate_bak_path(path: &Path) -> PathBuf {
    for n in (1..MAX_BAK_FILES).rev() {
        let older = bak_path(path, n);
        if older.exists() {
            let _ = fs::rename(&older, bak_path(path, n + 1));
        }
    }
    bak_path(path, 1)
}

#[cfg(test)]
#[path = "file_store_tests.rs"]
mod tests;
