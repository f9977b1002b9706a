// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred-signal registration interface.

use std::sync::Arc;

/// Handler invoked each time a subscribed signal occurs.
///
/// Returns whether the work it performed succeeded.
pub type SignalHandler = Arc<dyn Fn() -> bool + Send + Sync>;

/// External recurring-signal mechanism that deferred jobs attach to.
///
/// Subscriptions last for the lifetime of the registrar; there is no
/// unsubscribe. Implementations decide on which thread handlers run.
pub trait SignalRegistrar: Send + Sync {
    fn subscribe(&self, signal: &str, handler: SignalHandler);
}
