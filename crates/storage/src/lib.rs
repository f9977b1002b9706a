// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable storage for cronjobs: file-backed run records, file error log,
//! and store configuration.

mod config;
pub mod env;
mod error_log;
mod file_store;

pub use config::{ConfigError, StoreConfig};
pub use error_log::FileErrorLog;
pub use file_store::FileRunStore;
