// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cronjobs run engine: dispatching job runs, deferred signals and error
//! logging.

mod dispatcher;
mod error_log;
mod interval;
pub mod logging;
mod signal_bus;

pub use dispatcher::Dispatcher;
pub use error_log::TracingErrorLog;
pub use interval::{Interval, IntervalSignals};
pub use logging::{setup_logging, LoggingError};
pub use signal_bus::SignalBus;
