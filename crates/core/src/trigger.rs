// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger reasons, run timing, and the classifier mapping a run outcome to
//! the trigger recorded on the job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a job's most recent attempt.
///
/// The numeric codes are what the run store persists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Never attempted
    #[default]
    Never,
    /// Ran on a normal direct dispatch
    Auto,
    /// Ran when its deferred signal fired
    Lazy,
    /// Ran on a forced (manual) dispatch
    Force,
    /// Last attempt failed, whatever the mode
    Error,
}

impl Trigger {
    pub const ALL: [Trigger; 5] = [
        Trigger::Never,
        Trigger::Auto,
        Trigger::Lazy,
        Trigger::Force,
        Trigger::Error,
    ];

    /// Persisted numeric code.
    pub fn code(self) -> i64 {
        match self {
            Trigger::Never => 1,
            Trigger::Auto => 2,
            Trigger::Lazy => 4,
            Trigger::Force => 8,
            Trigger::Error => 16,
        }
    }

    /// Decode a persisted code. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Message key of the human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Trigger::Auto => "Auto",
            Trigger::Lazy => "Lazy",
            Trigger::Force => "Manual",
            Trigger::Error => "Error",
            Trigger::Never => "Unknown",
        }
    }

    /// Label key of a raw persisted code; `"Unknown"` when unrecognised.
    pub fn label_for_code(code: i64) -> &'static str {
        Self::from_code(code).map_or("Unknown", Self::label)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Never => write!(f, "never"),
            Trigger::Auto => write!(f, "auto"),
            Trigger::Lazy => write!(f, "lazy"),
            Trigger::Force => write!(f, "force"),
            Trigger::Error => write!(f, "error"),
        }
    }
}

/// Application lifecycle phase a job is eligible to run in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    AtInit,
    #[default]
    AtReady,
}

impl Timing {
    pub fn code(self) -> i64 {
        match self {
            Timing::AtInit => 1,
            Timing::AtReady => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Timing::AtInit),
            2 => Some(Timing::AtReady),
            _ => None,
        }
    }

    /// Message key of the human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Timing::AtInit => "onInit",
            Timing::AtReady => "onReady",
        }
    }

    /// Label key of a raw timing code; `"Unknown"` when unrecognised.
    pub fn label_for_code(code: i64) -> &'static str {
        Self::from_code(code).map_or("Unknown", Self::label)
    }
}

/// How a run attempt was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Direct dispatch without force
    Auto,
    /// Direct dispatch with force
    Force,
    /// Fired by a deferred signal
    Lazy,
}

impl RunMode {
    /// Mode of an immediate (non-deferred) dispatch.
    pub fn immediate(force: bool) -> Self {
        if force {
            RunMode::Force
        } else {
            RunMode::Auto
        }
    }
}

/// Result of invoking a job's callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Error message to record; empty on success.
    pub fn error_message(&self) -> &str {
        match self {
            Outcome::Success => "",
            Outcome::Failure(message) => message,
        }
    }
}

/// Map an attempt's mode and outcome to the trigger recorded on the job.
///
/// Failures classify as [`Trigger::Error`] regardless of mode. Never returns
/// [`Trigger::Never`].
pub fn classify(mode: RunMode, outcome: &Outcome) -> Trigger {
    match (outcome, mode) {
        (Outcome::Failure(_), _) => Trigger::Error,
        (Outcome::Success, RunMode::Auto) => Trigger::Auto,
        (Outcome::Success, RunMode::Force) => Trigger::Force,
        (Outcome::Success, RunMode::Lazy) => Trigger::Lazy,
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
