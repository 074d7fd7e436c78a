//! End-to-end runs of the harness: configuration file in, report out.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tickbench::{App, HarnessConfig};

// The App slot is process-wide; tests in this binary run in parallel.
static APP_LOCK: Mutex<()> = Mutex::new(());

fn app_lock() -> MutexGuard<'static, ()> {
    APP_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn full_run_from_seeded_config() {
    let _guard = app_lock();

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tickbench.yml");
    let source_path = dir.path().join("source.yml");

    // a small, fast variant of the canonical check, with a deadline generous
    // enough to pass on any machine
    let template = HarnessConfig {
        label: "integration".into(),
        interval_us: 1_000,
        ticks: 20,
        deadline_ms: 30_000,
        warmup_pumps: 100,
    };
    confy::store_path(&source_path, &template).unwrap();

    let config = HarnessConfig::load_or_seed(&config_path, &source_path).unwrap();
    assert!(config_path.exists());

    let mut app = App::try_new().unwrap();
    app.warm_up(config.warmup_pumps).unwrap();

    let report = app.run_probe(&config.probe_spec()).unwrap();

    assert_eq!(report.label, "integration");
    assert_eq!(report.ticks, 20);
    assert_eq!(report.interval, Duration::from_millis(1));
    assert!(report.elapsed > Duration::ZERO);
    report.verify().unwrap();
}

#[test]
fn report_serializes_for_json_output() {
    let _guard = app_lock();

    let mut app = App::try_new().unwrap();
    let spec = HarnessConfig {
        ticks: 3,
        interval_us: 0,
        deadline_ms: 30_000,
        ..Default::default()
    }
    .probe_spec();

    let report = app.run_probe(&spec).unwrap();
    let json = serde_json::to_string(&report).unwrap();

    assert!(json.contains("\"ticks\":3"));
    assert!(json.contains("\"label\":\"tickbench\""));
}
