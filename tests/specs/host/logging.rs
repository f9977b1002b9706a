//! Log output of a host wired with file-backed logs.
//!
//! Installs the global subscriber, so this is the only spec that may call
//! `setup_logging`.

use crate::prelude::*;
use cj_core::ERROR_LOG_CATEGORY;
use cj_engine::{setup_logging, Dispatcher};
use cj_storage::StoreConfig;
use std::sync::Arc;

#[test]
fn failures_reach_tracing_log_and_error_file() {
    let host = Host::new();
    let config = StoreConfig {
        log_dir: Some(host.dir.path().join("logs")),
        ..StoreConfig::default()
    };
    let error_log = Arc::new(config.error_log().unwrap());
    let dispatcher = Dispatcher::new(host.bus.clone(), error_log.clone());
    let log_path = host.dir.path().join("logs/cronjobs.log");
    let guard = setup_logging(&log_path).unwrap();

    let mut job = host.job("SendDigest");
    job.on_run(|_| Err("SMTP timeout".into()));
    let job = job.into_shared();
    assert!(!dispatcher.run(&job, false));
    drop(guard);

    let errors = std::fs::read_to_string(error_log.file_for(ERROR_LOG_CATEGORY)).unwrap();
    assert_eq!(errors.lines().count(), 1);
    assert!(errors.ends_with("\tCronError in \"SendDigest\": SMTP timeout\n"));

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("job run failed"), "{log}");
    assert!(log.contains("job=SendDigest"), "{log}");
}
