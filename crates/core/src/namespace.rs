// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`JobNamespace`] newtype: a sanitized path segment grouping jobs.

use crate::sanitize::path_name;

/// A job namespace.
///
/// Always holds a URL-path-safe token (see [`path_name`]). An empty
/// `JobNamespace` means the job is not grouped; a non-empty one forces
/// direct dispatch through the namespace's path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct JobNamespace(String);

impl JobNamespace {
    /// Sanitize any string-like value into a namespace.
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(path_name(s.as_ref()))
    }

    /// Convert to `Option<&str>`, mapping empty to `None`.
    pub fn to_option(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(&self.0)
        }
    }

    /// Dispatch path for this namespace: trimmed of `/` with a single
    /// trailing `/`, or `""` when there is no namespace.
    pub fn path(&self) -> String {
        let trimmed = self.0.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}/", trimmed)
        }
    }
}

impl std::ops::Deref for JobNamespace {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for JobNamespace {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for JobNamespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
