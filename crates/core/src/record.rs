// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persisted run record: `[last_run, trigger_code, last_error]`.

use crate::trigger::Trigger;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Reasons a stored value cannot be decoded into a [`RunRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("run record must be an array, got {0}")]
    NotAnArray(String),
    #[error("run record needs at least 2 elements, got {0}")]
    TooShort(usize),
    #[error("unknown trigger code: {0}")]
    UnknownTrigger(i64),
}

/// Durable run state of one job.
///
/// Serialized as a JSON array so records written by other tooling
/// (`[1700000000, 2]` or `["1700000000", "2", null]`) still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "(u64, i64, String)")]
pub struct RunRecord {
    /// Unix seconds of the attempt
    pub last_run: u64,
    pub trigger: Trigger,
    /// Empty when the attempt succeeded
    pub last_error: String,
}

impl RunRecord {
    pub fn new(last_run: u64, trigger: Trigger, last_error: impl Into<String>) -> Self {
        Self {
            last_run,
            trigger,
            last_error: last_error.into(),
        }
    }

    /// Whether the record satisfies `trigger == Never` iff `last_run == 0`.
    pub fn is_consistent(&self) -> bool {
        (self.trigger == Trigger::Never) == (self.last_run == 0)
    }
}

impl TryFrom<Value> for RunRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Array(items) = value else {
            return Err(RecordError::NotAnArray(value.to_string()));
        };
        if items.len() < 2 {
            return Err(RecordError::TooShort(items.len()));
        }

        let last_run = coerce_int(&items[0]).max(0) as u64;
        let code = coerce_int(&items[1]);
        let trigger = Trigger::from_code(code).ok_or(RecordError::UnknownTrigger(code))?;
        let last_error = match items.get(2) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Ok(Self {
            last_run,
            trigger,
            last_error,
        })
    }
}

impl From<RunRecord> for (u64, i64, String) {
    fn from(record: RunRecord) -> Self {
        (record.last_run, record.trigger.code(), record.last_error)
    }
}

/// Loose integer coercion: numbers truncate, numeric strings parse,
/// booleans map to 0/1, anything else is 0.
fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
