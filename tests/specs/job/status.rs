//! Operator-facing job status.

use crate::prelude::*;
use cj_core::{Catalog, Untranslated};
use serde_json::json;
use similar_asserts::assert_eq;

#[test]
fn never_run_job_status() {
    let host = Host::new();
    let mut job = host.job("SendDigest");
    job.set_deferred_signal(Some("Every::Day"));

    let status = serde_json::to_value(job.status(&Untranslated)).unwrap();

    assert_eq!(
        status,
        json!({
            "name": "SendDigest",
            "trigger": "never",
            "trigger_label": "Unknown",
            "last_run": 0,
            "last_error": "",
            "disabled": false,
            "path": "",
            "timing": "at_ready",
            "timing_label": "onReady",
            "deferred_signal": "Every::Day",
        })
    );
}

#[test]
fn status_after_forced_run_is_translated() {
    let host = Host::new();
    let (job, _) = host.counting("Report");
    job.lock().set_namespace("Invoices");
    host.dispatcher.run(&job, true);

    let catalog = Catalog::from_toml_str(
        r#"
        Manual = "Manuell"
        onReady = "Bei Bereitschaft"
        "#,
    )
    .unwrap();
    let status = job.lock().status(&catalog);

    assert_eq!(status.trigger_label, "Manuell");
    assert_eq!(status.timing_label, "Bei Bereitschaft");
    assert_eq!(status.path, "invoices/");
    assert_eq!(status.last_run, host.now_secs());
    assert_eq!(status.deferred_signal, None);
}
