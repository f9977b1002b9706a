//! The run document shared between processes.

use crate::prelude::*;
use cj_core::{RunRecord, RunStore, Trigger};
use cj_storage::StoreConfig;
use serde_json::json;
use similar_asserts::assert_eq;

#[test]
fn configured_namespace_scopes_records() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::from_toml_str(&format!(
        "[store]\nnamespace = \"Billing\"\npath = {:?}\n",
        dir.path().join("runs.json")
    ))
    .unwrap();
    let host = Host::with_config(dir, &config);

    let (job, _) = host.counting("Invoice");
    host.dispatcher.run(&job, false);

    assert_eq!(
        host.runs_json(),
        json!({ "Billing": { "Invoice": [host.now_secs(), 2, ""] } })
    );
    assert_eq!(host.records.keys().unwrap(), vec!["Invoice"]);
}

#[test]
fn inconsistent_record_is_not_hydrated() {
    let host = Host::new();
    std::fs::write(
        host.runs_path(),
        r#"{ "CronJob": { "SendDigest": [0, 2, "stale"] } }"#,
    )
    .unwrap();

    let job = host.job("SendDigest");

    assert_eq!(job.last_run(), 0);
    assert_eq!(job.trigger(), Trigger::Never);
    assert_eq!(job.last_error(), "");
}

#[test]
fn corrupt_document_is_replaced_on_next_run() {
    let host = Host::new();
    std::fs::write(host.runs_path(), "not json at all").unwrap();

    let (job, _) = host.counting("SendDigest");
    assert_eq!(job.lock().trigger(), Trigger::Never);
    host.dispatcher.run(&job, false);

    assert!(host.dir.path().join("runs.bak").exists());
    assert_eq!(
        host.reopen_store().get("CronJob", "SendDigest").unwrap(),
        Some(RunRecord::new(host.now_secs(), Trigger::Auto, ""))
    );
}

#[test]
fn clearing_forgets_history() {
    let host = Host::new();
    for name in ["First", "Second"] {
        let (job, _) = host.counting(name);
        host.dispatcher.run(&job, false);
    }

    assert_eq!(host.records.count().unwrap(), 2);
    assert_eq!(host.records.clear().unwrap(), 2);

    let job = host.job("First");
    assert_eq!(job.trigger(), Trigger::Never);
    assert_eq!(host.runs_json(), json!({}));
}
