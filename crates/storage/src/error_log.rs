// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error log that appends to one text file per category.

use cj_core::ErrorLog;
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// [`ErrorLog`] writing `<timestamp>\t<message>` lines to `<dir>/<category>.txt`.
#[derive(Debug)]
pub struct FileErrorLog {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileErrorLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `category`.
    pub fn file_for(&self, category: &str) -> PathBuf {
        let stem = cj_core::path_name(category);
        let stem = if stem.is_empty() {
            "errors".to_string()
        } else {
            stem.replace('/', "-")
        };
        self.dir.join(format!("{stem}.txt"))
    }

    fn append(&self, message: &str, category: &str) -> std::io::Result<()> {
        let _guard = self.lock.lock();
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_for(category))?;
        let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "{stamp}\t{}", message.replace('\n', " "))
    }
}

impl ErrorLog for FileErrorLog {
    fn log(&self, message: &str, category: &str) {
        if let Err(e) = self.append(message, category) {
            tracing::warn!(
                error = %e,
                dir = %self.dir.display(),
                category,
                "failed to write error log; message: {message}",
            );
        }
    }
}
