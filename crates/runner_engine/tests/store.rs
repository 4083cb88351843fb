use std::fs;

use pretty_assertions::assert_eq;
use runner_core::RunDescriptor;
use runner_engine::{PersistError, RunStore};
use serde_json::{json, Value};
use tempfile::TempDir;

fn run(id: &str, dataset: &str) -> RunDescriptor {
    serde_json::from_value(json!({"id": id, "defaultDatasetId": dataset})).unwrap()
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn first_run_creates_a_one_entry_log() {
    let temp = TempDir::new().unwrap();
    let store = RunStore::new(temp.path());

    let len = store.record_run(&run("r1", "d1")).unwrap();

    assert_eq!(len, 1);
    assert_eq!(
        read_json(&temp.path().join("run.json")),
        json!([{"id": "r1", "defaultDatasetId": "d1"}])
    );
}

#[test]
fn second_run_is_appended_and_becomes_latest() {
    let temp = TempDir::new().unwrap();
    let store = RunStore::new(temp.path());

    store.record_run(&run("r1", "d1")).unwrap();
    store.record_run(&run("r2", "d2")).unwrap();

    let ids: Vec<_> = store.runs().unwrap().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
    assert_eq!(store.latest_run().unwrap().id(), "r2");
}

#[test]
fn missing_run_log_has_no_latest_run() {
    let temp = TempDir::new().unwrap();
    let store = RunStore::new(temp.path());

    let err = store.latest_run().unwrap_err();
    assert!(matches!(err, PersistError::EmptyRunLog(_)), "{err}");
}

#[test]
fn resolve_run_by_id_or_latest() {
    let temp = TempDir::new().unwrap();
    let store = RunStore::new(temp.path());
    store.record_run(&run("r1", "d1")).unwrap();
    store.record_run(&run("r2", "d2")).unwrap();

    assert_eq!(store.resolve_run(None).unwrap().id(), "r2");
    assert_eq!(store.resolve_run(Some("r1")).unwrap().default_dataset_id(), "d1");
    assert!(matches!(
        store.resolve_run(Some("r9")),
        Err(PersistError::UnknownRun(id)) if id == "r9"
    ));
}

#[test]
fn run_log_entry_without_dataset_is_corrupt() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("run.json"), r#"[{"id": "r1"}]"#).unwrap();
    let store = RunStore::new(temp.path());

    let err = store.latest_run().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("entry 0"), "{message}");
    assert!(message.contains("defaultDatasetId"), "{message}");
}

#[test]
fn dataset_items_land_in_per_run_file() {
    let temp = TempDir::new().unwrap();
    let store = RunStore::new(temp.path());

    let len = store
        .dataset_file("r1")
        .unwrap()
        .append(&[json!({"text": "a"}), json!({"text": "b"})])
        .unwrap();

    assert_eq!(len, 2);
    assert_eq!(
        read_json(&temp.path().join("dataset-r1.json")),
        json!([{"text": "a"}, {"text": "b"}])
    );
}

#[test]
fn run_results_accumulate_per_run() {
    let temp = TempDir::new().unwrap();
    let store = RunStore::new(temp.path());

    let results = store.run_result_file("r1").unwrap();
    results.append(&[run("r1", "d1")]).unwrap();
    let len = results.append(&[run("r1", "d1")]).unwrap();

    assert_eq!(len, 2);
    assert!(temp.path().join("run-result-r1.json").is_file());
    assert!(!temp.path().join("run.json").exists());
}

#[test]
fn unusable_run_id_is_rejected() {
    let temp = TempDir::new().unwrap();
    let store = RunStore::new(temp.path());

    let err = store.dataset_file("..").unwrap_err();
    assert!(matches!(err, PersistError::InvalidRunId(_)), "{err}");
}
