// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cj-core: job entity, trigger classification and the collaborator traits
//! (run store, signal registrar, error log) that the cronjobs engine consumes.

pub mod callback;
pub mod clock;
pub mod error_log;
pub mod i18n;
pub mod job;
pub mod namespace;
pub mod record;
pub mod sanitize;
pub mod signal;
pub mod store;
pub mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use callback::{BoxError, CallbackResult, JobCallback};
pub use clock::{Clock, FakeClock, SystemClock};
pub use error_log::{format_job_error, ErrorLog, LogEntry, MemoryErrorLog, ERROR_LOG_CATEGORY};
pub use i18n::{Catalog, Localizer, Untranslated};
pub use job::{Job, JobStatus, SharedJob};
pub use namespace::JobNamespace;
pub use record::{RecordError, RunRecord};
pub use sanitize::{pascal_case, path_name};
pub use signal::{SignalHandler, SignalRegistrar};
pub use store::{MemoryRunStore, RunRecords, RunStore, StoreError, DEFAULT_STORE_NAMESPACE};
pub use trigger::{classify, Outcome, RunMode, Timing, Trigger};
