// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring `Every::*` signals driven by host ticks

use crate::signal_bus::SignalBus;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// A well-known recurring signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Minute,
    FiveMinutes,
    FifteenMinutes,
    HalfHour,
    Hour,
    SixHours,
    Day,
    Week,
}

impl Interval {
    /// Shortest first.
    pub const ALL: [Interval; 8] = [
        Interval::Minute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::HalfHour,
        Interval::Hour,
        Interval::SixHours,
        Interval::Day,
        Interval::Week,
    ];

    pub fn duration(self) -> Duration {
        let secs = match self {
            Interval::Minute => 60,
            Interval::FiveMinutes => 5 * 60,
            Interval::FifteenMinutes => 15 * 60,
            Interval::HalfHour => 30 * 60,
            Interval::Hour => 3600,
            Interval::SixHours => 6 * 3600,
            Interval::Day => 86400,
            Interval::Week => 7 * 86400,
        };
        Duration::from_secs(secs)
    }

    /// Signal name jobs subscribe to, e.g. `"Every::Hour"`.
    pub fn signal(self) -> &'static str {
        match self {
            Interval::Minute => "Every::Minute",
            Interval::FiveMinutes => "Every::FiveMinutes",
            Interval::FifteenMinutes => "Every::FifteenMinutes",
            Interval::HalfHour => "Every::HalfHour",
            Interval::Hour => "Every::Hour",
            Interval::SixHours => "Every::SixHours",
            Interval::Day => "Every::Day",
            Interval::Week => "Every::Week",
        }
    }

    pub fn from_signal(signal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.signal() == signal)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signal())
    }
}

/// Fires each [`Interval`] signal on a [`SignalBus`] once its duration has
/// elapsed since it last fired.
///
/// The host calls [`tick`](Self::tick) periodically (e.g. on every request).
/// The first tick only arms the intervals. Missed periods are not replayed:
/// an interval fires at most once per tick.
#[derive(Debug, Default)]
pub struct IntervalSignals {
    last_fired: HashMap<Interval, Instant>,
}

impl IntervalSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        !self.last_fired.is_empty()
    }

    /// Fire every due interval, shortest first. Returns the intervals fired.
    pub fn tick(&mut self, bus: &SignalBus, now: Instant) -> Vec<Interval> {
        if !self.is_armed() {
            for interval in Interval::ALL {
                self.last_fired.insert(interval, now);
            }
            tracing::debug!("interval signals armed");
            return Vec::new();
        }

        let mut fired = Vec::new();
        for interval in Interval::ALL {
            let due = self
                .last_fired
                .get(&interval)
                .map_or(true, |last| {
                    now.saturating_duration_since(*last) >= interval.duration()
                });
            if due {
                self.last_fired.insert(interval, now);
                let results = bus.fire(interval.signal());
                tracing::debug!(
                    signal = interval.signal(),
                    handlers = results.len(),
                    failed = results.iter().filter(|ok| !**ok).count(),
                    "interval fired",
                );
                fired.push(interval);
            }
        }
        fired
    }

    /// When the next interval becomes due, if armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last_fired
            .iter()
            .map(|(interval, last)| *last + interval.duration())
            .min()
    }
}

#[cfg(test)]
#[path = "interval_tests.rs"]
mod tests;
