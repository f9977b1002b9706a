// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process signal registrar

use cj_core::{SignalHandler, SignalRegistrar};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Named signals with their subscribed handlers.
///
/// Firing runs the handlers synchronously on the calling thread, in
/// subscription order.
#[derive(Default)]
pub struct SignalBus {
    handlers: Mutex<HashMap<String, Vec<SignalHandler>>>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire a signal, returning each handler's result.
    pub fn fire(&self, signal: &str) -> Vec<bool> {
        // Snapshot so handlers may subscribe while the signal fires
        let handlers = self
            .handlers
            .lock()
            .get(signal)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(signal, handlers = handlers.len(), "firing signal");
        handlers.iter().map(|handler| handler()).collect()
    }

    pub fn subscriber_count(&self, signal: &str) -> usize {
        self.handlers.lock().get(signal).map_or(0, Vec::len)
    }

    /// Signals with at least one subscriber, sorted.
    pub fn signals(&self) -> Vec<String> {
        let mut signals: Vec<String> = self.handlers.lock().keys().cloned().collect();
        signals.sort();
        signals
    }
}

impl SignalRegistrar for SignalBus {
    fn subscribe(&self, signal: &str, handler: SignalHandler) {
        self.handlers
            .lock()
            .entry(signal.to_string())
            .or_default()
            .push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn fire_without_subscribers_is_empty() {
        let bus = SignalBus::new();
        assert!(bus.fire("Every::Hour").is_empty());
        assert_eq!(bus.subscriber_count("Every::Hour"), 0);
    }

    #[test]
    fn fire_runs_handlers_in_order() {
        let bus = SignalBus::new();
        bus.subscribe("Every::Hour", Arc::new(|| true));
        bus.subscribe("Every::Hour", Arc::new(|| false));
        bus.subscribe("Every::Day", Arc::new(|| true));

        assert_eq!(bus.fire("Every::Hour"), vec![true, false]);
        assert_eq!(bus.subscriber_count("Every::Hour"), 2);
        assert_eq!(bus.signals(), vec!["Every::Day", "Every::Hour"]);
    }

    #[test]
    fn handlers_persist_across_fires() {
        let bus = SignalBus::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        bus.subscribe(
            "Every::Minute",
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }),
        );

        bus.fire("Every::Minute");
        bus.fire("Every::Minute");
        bus.fire("Every::Hour");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handler_may_subscribe_while_firing() {
        let bus = Arc::new(SignalBus::new());
        let inner = Arc::clone(&bus);
        bus.subscribe(
            "Every::Hour",
            Arc::new(move || {
                inner.subscribe("Every::Day", Arc::new(|| true));
                true
            }),
        );

        assert_eq!(bus.fire("Every::Hour"), vec![true]);
        assert_eq!(bus.subscriber_count("Every::Day"), 1);
    }
}
