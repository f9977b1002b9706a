//! Interval signals driving deferred jobs.

use crate::prelude::*;
use cj_core::{Trigger, ERROR_LOG_CATEGORY};
use cj_engine::{Interval, IntervalSignals};
use similar_asserts::assert_eq;
use std::time::{Duration, Instant};

#[test]
fn hourly_job_runs_once_per_hour() {
    let host = Host::new();
    let (job, calls) = host.counting("Cleanup");
    job.lock().set_deferred_signal(Some(Interval::Hour.signal()));
    host.dispatcher.run(&job, false);

    let start = Instant::now();
    let mut signals = IntervalSignals::new();
    assert!(signals.tick(&host.bus, start).is_empty());
    assert_eq!(invocations(&calls), 0);

    signals.tick(&host.bus, start + Duration::from_secs(30 * 60));
    assert_eq!(invocations(&calls), 0);

    let fired = signals.tick(&host.bus, start + Duration::from_secs(60 * 60));
    assert!(fired.contains(&Interval::Hour));
    assert_eq!(invocations(&calls), 1);
    assert_eq!(job.lock().trigger(), Trigger::Lazy);

    signals.tick(&host.bus, start + Duration::from_secs(90 * 60));
    assert_eq!(invocations(&calls), 1);
    signals.tick(&host.bus, start + Duration::from_secs(120 * 60));
    assert_eq!(invocations(&calls), 2);
}

#[test]
fn failing_deferred_job_keeps_firing() {
    let host = Host::new();
    let mut job = host.job("Sync");
    job.on_run(|_| Err("upstream 503".into()))
        .set_deferred_signal(Some("Every::Minute"));
    let job = job.into_shared();
    host.dispatcher.run(&job, false);

    let start = Instant::now();
    let mut signals = IntervalSignals::new();
    signals.tick(&host.bus, start);
    signals.tick(&host.bus, start + Duration::from_secs(60));
    signals.tick(&host.bus, start + Duration::from_secs(120));

    assert_eq!(host.errors.in_category(ERROR_LOG_CATEGORY).len(), 2);
    let job = job.lock();
    assert_eq!(job.trigger(), Trigger::Error);
    assert_eq!(job.last_error(), "upstream 503");
}

#[test]
fn disabled_deferred_job_never_fires() {
    let host = Host::new();
    let (job, calls) = host.counting("Cleanup");
    job.lock()
        .set_deferred_signal(Some("Every::Minute"))
        .set_disabled(true);

    assert!(!host.dispatcher.run(&job, false));

    let start = Instant::now();
    let mut signals = IntervalSignals::new();
    signals.tick(&host.bus, start);
    signals.tick(&host.bus, start + Duration::from_secs(60));

    assert_eq!(invocations(&calls), 0);
    assert_eq!(host.bus.subscriber_count("Every::Minute"), 0);
}
