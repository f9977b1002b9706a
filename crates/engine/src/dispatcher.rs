// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run dispatch: one execution attempt of a job, immediate or deferred.
//!
//! A job with an effective deferred signal dispatched without `force` is not
//! run; a handler is subscribed to the signal instead and every firing runs
//! it as a lazy attempt. Everything else runs the callback on the calling
//! thread. Callback failures (returned errors and panics alike) never escape
//! the dispatcher: they are logged, recorded on the job, and reported as
//! `false`.

use cj_core::{
    format_job_error, ErrorLog, Job, Outcome, RunMode, SharedJob, SignalRegistrar,
    ERROR_LOG_CATEGORY,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Dispatches job runs against a signal registrar and an error log.
#[derive(Clone)]
pub struct Dispatcher {
    signals: Arc<dyn SignalRegistrar>,
    errors: Arc<dyn ErrorLog>,
}

impl Dispatcher {
    pub fn new(signals: Arc<dyn SignalRegistrar>, errors: Arc<dyn ErrorLog>) -> Self {
        Self { signals, errors }
    }

    /// Run `job` once.
    ///
    /// Immediate runs return whether the callback succeeded. Deferred runs
    /// return `true` once the handler is subscribed, and `false` without
    /// subscribing when the job is disabled; on that path `true` means
    /// "subscribed", not "ran".
    ///
    /// The callback runs with the job locked. Serializing dispatches of one
    /// job is the caller's responsibility: an immediate run of a job that is
    /// already running blocks until the running attempt finishes, while a
    /// signal firing for a job that is already running (including from
    /// inside its own callback) is skipped and reports `false`.
    pub fn run(&self, job: &SharedJob, force: bool) -> bool {
        let mut guard = job.lock();
        let span = tracing::info_span!("job.run", job = %guard.name(), force);
        let _enter = span.enter();

        match guard.deferred_signal().map(String::from) {
            Some(signal) if !force => {
                if guard.is_disabled() {
                    tracing::info!(%signal, "job disabled, not subscribing");
                    return false;
                }
                drop(guard);
                self.defer(job, &signal);
                true
            }
            _ => execute(&mut guard, RunMode::immediate(force), self.errors.as_ref()),
        }
    }

    fn defer(&self, job: &SharedJob, signal: &str) {
        let job = Arc::clone(job);
        let errors = Arc::clone(&self.errors);
        self.signals.subscribe(
            signal,
            Arc::new(move || {
                let Some(mut job) = job.try_lock() else {
                    tracing::warn!("job already running, skipping signal");
                    return false;
                };
                let span = tracing::info_span!("job.lazy", job = %job.name());
                let _enter = span.enter();
                execute(&mut job, RunMode::Lazy, errors.as_ref())
            }),
        );
        tracing::info!(signal, "job deferred until signal");
    }
}

/// Invoke the callback, route a failure to the error log, record the attempt.
fn execute(job: &mut Job, mode: RunMode, errors: &dyn ErrorLog) -> bool {
    let outcome = invoke(job);
    if let Outcome::Failure(message) = &outcome {
        errors.log(&format_job_error(job.name(), message), ERROR_LOG_CATEGORY);
    }

    let succeeded = job.finish_attempt(mode, &outcome);
    if succeeded {
        tracing::info!(trigger = %job.trigger(), last_run = job.last_run(), "job run succeeded");
    } else {
        tracing::warn!(error = job.last_error(), last_run = job.last_run(), "job run failed");
    }
    succeeded
}

fn invoke(job: &Job) -> Outcome {
    let callback = job.callback().clone();
    match panic::catch_unwind(AssertUnwindSafe(|| callback.invoke(job))) {
        Ok(Ok(())) => Outcome::Success,
        Ok(Err(e)) => Outcome::Failure(e.to_string()),
        Err(payload) => Outcome::Failure(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "job callback panicked".to_string()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
