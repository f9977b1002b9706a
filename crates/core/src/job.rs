// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job entity: configuration, run state and its persistence contract.
//!
//! Fields are written through setters that normalize what they are given.
//! `trigger` and `last_run` move together so that `trigger == Never` holds
//! exactly when `last_run == 0`, and every `last_run > 0` write persists the
//! `[last_run, trigger, last_error]` record under the job's name.

use crate::callback::{CallbackResult, JobCallback};
use crate::clock::Clock;
use crate::i18n::Localizer;
use crate::namespace::JobNamespace;
use crate::record::RunRecord;
use crate::sanitize::pascal_case;
use crate::store::RunRecords;
use crate::trigger::{classify, Outcome, RunMode, Timing, Trigger};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A job shared between its owner and deferred-signal handlers.
pub type SharedJob = Arc<Mutex<Job>>;

/// A named unit of work with its configuration and run state.
pub struct Job {
    name: String,
    callback: JobCallback,
    deferred_signal: Option<String>,
    namespace: JobNamespace,
    timing: Timing,
    /// Unix seconds; 0 = never run
    last_run: u64,
    disabled: bool,
    trigger: Trigger,
    last_error: String,
    records: RunRecords,
    clock: Arc<dyn Clock>,
}

impl Job {
    /// Create an unnamed job with default configuration.
    pub fn new(records: RunRecords, clock: Arc<dyn Clock>) -> Self {
        Self {
            name: String::new(),
            callback: JobCallback::Noop,
            deferred_signal: None,
            namespace: JobNamespace::default(),
            timing: Timing::default(),
            last_run: 0,
            disabled: false,
            trigger: Trigger::Never,
            last_error: String::new(),
            records,
            clock,
        }
    }

    /// Create a job and assign its name, hydrating prior run state.
    pub fn named(name: &str, records: RunRecords, clock: Arc<dyn Clock>) -> Self {
        let mut job = Self::new(records, clock);
        job.set_name(name);
        job
    }

    pub fn into_shared(self) -> SharedJob {
        Arc::new(Mutex::new(self))
    }

    // --- setters ---

    /// Assign the job name.
    ///
    /// The name is normalized to PascalCase; names that normalize to nothing
    /// are ignored. A stored record under the normalized name replaces the
    /// current run state without being written back.
    pub fn set_name(&mut self, name: &str) -> &mut Self {
        let normalized = pascal_case(name);
        if normalized.is_empty() {
            tracing::warn!(name, "ignoring empty job name");
            return self;
        }
        self.name = normalized;

        if let Some(record) = self.records.load(&self.name) {
            self.hydrate(record);
        }
        self
    }

    fn hydrate(&mut self, record: RunRecord) {
        if !record.is_consistent() {
            tracing::warn!(
                job = %self.name,
                last_run = record.last_run,
                trigger = %record.trigger,
                "discarding inconsistent run record",
            );
            return;
        }
        tracing::debug!(job = %self.name, last_run = record.last_run, trigger = %record.trigger, "hydrated run state");
        self.last_run = record.last_run;
        self.trigger = record.trigger;
        self.last_error = record.last_error;
    }

    /// Assign the callback. `None` installs a no-op.
    pub fn set_callback(&mut self, callback: Option<JobCallback>) -> &mut Self {
        self.callback = callback.unwrap_or_default();
        self
    }

    /// Assign a closure as the callback.
    pub fn on_run<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Job) -> CallbackResult + Send + Sync + 'static,
    {
        self.set_callback(Some(JobCallback::new(f)))
    }

    /// Assign the deferred signal name; empty or `None` clears it.
    ///
    /// Stored even when the job has a namespace, but reads as absent there.
    pub fn set_deferred_signal(&mut self, signal: Option<&str>) -> &mut Self {
        self.deferred_signal = signal
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        if self.deferred_signal.is_some() && !self.namespace.is_empty() {
            tracing::debug!(job = %self.name, namespace = %self.namespace, "deferred signal masked by namespace");
        }
        self
    }

    /// Assign the namespace, sanitized to a URL-path-safe token.
    pub fn set_namespace(&mut self, namespace: &str) -> &mut Self {
        self.namespace = JobNamespace::new(namespace);
        self
    }

    pub fn set_timing(&mut self, timing: Timing) -> &mut Self {
        self.timing = timing;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) -> &mut Self {
        self.disabled = disabled;
        self
    }

    /// Assign the trigger of an already attempted job.
    ///
    /// Ignored while the job has never run, and `Never` is ignored once it
    /// has. Not persisted until the next `last_run` write.
    pub fn set_trigger(&mut self, trigger: Trigger) -> &mut Self {
        if self.last_run == 0 || trigger == Trigger::Never {
            tracing::debug!(job = %self.name, %trigger, last_run = self.last_run, "trigger change ignored");
            return self;
        }
        self.trigger = trigger;
        self
    }

    pub fn set_last_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.last_error = error.into();
        self
    }

    /// Assign the last run time and persist the run record.
    ///
    /// `0` resets the job to never-run and writes nothing. A first non-zero
    /// time on a never-run job records it as a manual run.
    pub fn set_last_run(&mut self, last_run: u64) -> &mut Self {
        self.last_run = last_run;
        if last_run == 0 {
            self.trigger = Trigger::Never;
            self.last_error.clear();
            return self;
        }

        if self.trigger == Trigger::Never {
            self.trigger = Trigger::Force;
        }
        self.persist();
        self
    }

    /// Set `last_run` to now.
    pub fn touch(&mut self) -> &mut Self {
        // A clock pinned at the epoch must still mark the job as run
        let now = self.clock.epoch_secs().max(1);
        self.set_last_run(now)
    }

    /// Record a finished attempt: error, then trigger, then persist.
    ///
    /// Returns whether the attempt succeeded.
    pub fn finish_attempt(&mut self, mode: RunMode, outcome: &Outcome) -> bool {
        self.last_error = outcome.error_message().to_string();
        self.trigger = classify(mode, outcome);
        self.touch();
        outcome.is_success()
    }

    fn persist(&self) {
        if self.name.is_empty() {
            tracing::warn!("not persisting run record of unnamed job");
            return;
        }
        let record = RunRecord::new(self.last_run, self.trigger, self.last_error.clone());
        self.records.persist(&self.name, &record);
    }

    // --- getters ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn callback(&self) -> &JobCallback {
        &self.callback
    }

    /// Effective deferred signal: always `None` for namespaced jobs.
    pub fn deferred_signal(&self) -> Option<&str> {
        if self.namespace.is_empty() {
            self.deferred_signal.as_deref()
        } else {
            None
        }
    }

    pub fn namespace(&self) -> &JobNamespace {
        &self.namespace
    }

    /// Namespace dispatch path (`"invoices/"`), or `""`.
    pub fn path(&self) -> String {
        self.namespace.path()
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn timing_label(&self, localizer: &dyn Localizer) -> String {
        localizer.translate(self.timing.label())
    }

    pub fn last_run(&self) -> u64 {
        self.last_run
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn trigger_label(&self, localizer: &dyn Localizer) -> String {
        localizer.translate(self.trigger.label())
    }

    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Read-only status snapshot for presentation.
    pub fn status(&self, localizer: &dyn Localizer) -> JobStatus {
        JobStatus {
            name: self.name.clone(),
            trigger: self.trigger,
            trigger_label: self.trigger_label(localizer),
            last_run: self.last_run,
            last_error: self.last_error.clone(),
            disabled: self.disabled,
            path: self.path(),
            timing: self.timing,
            timing_label: self.timing_label(localizer),
            deferred_signal: self.deferred_signal().map(String::from),
        }
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("callback", &self.callback)
            .field("deferred_signal", &self.deferred_signal)
            .field("namespace", &self.namespace)
            .field("timing", &self.timing)
            .field("last_run", &self.last_run)
            .field("disabled", &self.disabled)
            .field("trigger", &self.trigger)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

/// Status of a job as shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStatus {
    pub name: String,
    pub trigger: Trigger,
    pub trigger_label: String,
    pub last_run: u64,
    pub last_error: String,
    pub disabled: bool,
    pub path: String,
    pub timing: Timing,
    pub timing_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferred_signal: Option<String>,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
