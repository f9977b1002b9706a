// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time source abstraction so run timestamps are deterministic in tests.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Source of monotonic and wall-clock time.
pub trait Clock: Send + Sync {
    /// Monotonic instant, used for interval bookkeeping.
    fn now(&self) -> Instant;

    /// Wall-clock milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64;

    /// Wall-clock seconds since the Unix epoch (the unit of `last_run`).
    fn epoch_secs(&self) -> u64 {
        self.epoch_ms() / 1000
    }
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[derive(Debug)]
struct FakeTime {
    instant: Instant,
    epoch_ms: u64,
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct FakeClock {
    time: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    /// Starting wall-clock time: 2023-11-14T22:13:20Z.
    pub const START_EPOCH_MS: u64 = 1_700_000_000_000;

    pub fn new() -> Self {
        Self {
            time: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                epoch_ms: Self::START_EPOCH_MS,
            })),
        }
    }

    /// Move both the monotonic and wall-clock time forward.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock();
        time.instant += duration;
        time.epoch_ms += duration.as_millis() as u64;
    }

    /// Pin the wall-clock time without touching the monotonic instant.
    pub fn set_epoch_ms(&self, epoch_ms: u64) {
        self.time.lock().epoch_ms = epoch_ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.time.lock().instant
    }

    fn epoch_ms(&self) -> u64 {
        self.time.lock().epoch_ms
    }
}
