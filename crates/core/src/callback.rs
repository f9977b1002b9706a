// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The unit of work a job runs.

use crate::job::Job;
use std::fmt;
use std::sync::Arc;

/// Error type job callbacks fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a job callback returns.
pub type CallbackResult = Result<(), BoxError>;

type CallbackFn = dyn Fn(&Job) -> CallbackResult + Send + Sync;

/// A job's callback. Receives the job itself as its only argument.
///
/// Cheap to clone; clones share the same function.
#[derive(Clone, Default)]
pub enum JobCallback {
    /// Does nothing and succeeds
    #[default]
    Noop,
    Func(Arc<CallbackFn>),
}

impl JobCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Job) -> CallbackResult + Send + Sync + 'static,
    {
        JobCallback::Func(Arc::new(f))
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, JobCallback::Noop)
    }

    pub fn invoke(&self, job: &Job) -> CallbackResult {
        match self {
            JobCallback::Noop => Ok(()),
            JobCallback::Func(f) => f(job),
        }
    }
}

impl fmt::Debug for JobCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobCallback::Noop => write!(f, "JobCallback::Noop"),
            JobCallback::Func(_) => write!(f, "JobCallback::Func(..)"),
        }
    }
}
