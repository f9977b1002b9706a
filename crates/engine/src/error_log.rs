// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error log backed by `tracing`

use cj_core::ErrorLog;

/// Emits each entry as an `ERROR` event carrying its category.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn log(&self, message: &str, category: &str) {
        tracing::error!(category, "{}", message);
    }
}
