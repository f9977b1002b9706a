//! Running jobs end to end against a file-backed store.

use crate::prelude::*;
use cj_core::{RunRecord, RunStore, Trigger, ERROR_LOG_CATEGORY};
use serde_json::json;
use similar_asserts::assert_eq;
use std::time::Duration;

#[test]
fn successful_run_persists_auto_record() {
    let host = Host::new();
    let (job, calls) = host.counting("SendDigest");

    assert!(host.dispatcher.run(&job, false));

    assert_eq!(invocations(&calls), 1);
    let now = host.now_secs();
    {
        let job = job.lock();
        assert_eq!(job.trigger(), Trigger::Auto);
        assert_eq!(job.last_run(), now);
    }
    assert_eq!(
        host.runs_json(),
        json!({ "CronJob": { "SendDigest": [now, 2, ""] } })
    );
    assert!(host.errors.is_empty());
}

#[test]
fn failed_forced_run_is_logged_and_persisted() {
    let host = Host::new();
    let mut job = host.job("SendDigest");
    job.on_run(|_| Err("SMTP timeout".into()));
    let job = job.into_shared();

    assert!(!host.dispatcher.run(&job, true));

    {
        let job = job.lock();
        assert_eq!(job.trigger(), Trigger::Error);
        assert_eq!(job.last_error(), "SMTP timeout");
    }
    let entries = host.errors.in_category(ERROR_LOG_CATEGORY);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].message.contains("SendDigest"));
    assert!(entries[0].message.contains("SMTP timeout"));
    assert_eq!(
        host.runs_json(),
        json!({ "CronJob": { "SendDigest": [host.now_secs(), 16, "SMTP timeout"] } })
    );
}

#[test]
fn namespaced_job_runs_immediately() {
    let host = Host::new();
    let (job, calls) = host.counting("Report");
    job.lock()
        .set_namespace("invoices")
        .set_deferred_signal(Some("Every::Hour"));

    assert_eq!(job.lock().deferred_signal(), None);
    assert!(host.dispatcher.run(&job, false));

    assert_eq!(invocations(&calls), 1);
    assert!(host.bus.signals().is_empty());
    assert_eq!(job.lock().trigger(), Trigger::Auto);
}

#[test]
fn run_state_survives_restart() {
    let host = Host::new();
    let mut job = host.job("SendDigest");
    job.on_run(|_| Err("SMTP timeout".into()));
    let job = job.into_shared();
    host.dispatcher.run(&job, false);
    let ran_at = host.now_secs();

    host.clock.advance(Duration::from_secs(3600));
    let host = host.restart();
    let job = host.job("send digest");

    assert_eq!(job.name(), "SendDigest");
    assert_eq!(job.last_run(), ran_at);
    assert_eq!(job.trigger(), Trigger::Error);
    assert_eq!(job.last_error(), "SMTP timeout");
}

#[test]
fn recovery_overwrites_previous_failure() {
    let host = Host::new();
    host.records
        .persist("Report", &RunRecord::new(1_000, Trigger::Error, "db down"));

    let (job, _) = host.counting("Report");
    assert_eq!(job.lock().trigger(), Trigger::Error);
    assert!(host.dispatcher.run(&job, true));

    assert_eq!(
        host.reopen_store().get("CronJob", "Report").unwrap(),
        Some(RunRecord::new(host.now_secs(), Trigger::Force, ""))
    );
}

#[test]
fn unnamed_job_runs_without_persisting() {
    let host = Host::new();
    let job = host.job("   ").into_shared();

    assert!(host.dispatcher.run(&job, false));

    assert_eq!(job.lock().trigger(), Trigger::Auto);
    assert!(!host.runs_path().exists());
}

#[test]
fn deferred_job_runs_when_signal_fires() {
    let host = Host::new();
    let (job, calls) = host.counting("Cleanup");
    job.lock().set_deferred_signal(Some("Every::Day"));

    assert!(host.dispatcher.run(&job, false));
    assert_eq!(invocations(&calls), 0);
    assert!(!host.runs_path().exists());

    assert_eq!(host.bus.fire("Every::Day"), vec![true]);

    assert_eq!(invocations(&calls), 1);
    assert_eq!(
        host.runs_json(),
        json!({ "CronJob": { "Cleanup": [host.now_secs(), 4, ""] } })
    );
}
