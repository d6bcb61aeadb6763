use proxbalance_presets::config::document::read_document;
use proxbalance_presets::presets::preset;
use proxbalance_presets::{
    apply_preset, list_presets, Error, NoopTimerUpdater, PresetApplier, PresetName, Result,
    TimerUpdater,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingUpdater {
    calls: RefCell<Vec<&'static str>>,
}

impl TimerUpdater for RecordingUpdater {
    fn update_timer(&self) -> Result<()> {
        self.calls.borrow_mut().push("update_timer");
        Ok(())
    }
}

fn existing_config() -> Value {
    json!({
        "proxmox_host": "10.0.0.10",
        "proxmox_port": 8006,
        "collection_interval_minutes": 60,
        "collection_optimization": { "cluster_size": "medium" },
        "web_ui": { "port": 80, "theme": "dark" },
        "tags": ["ignore", "exclude_group"]
    })
}

fn write_config(dir: &TempDir, value: &Value) -> PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn every_preset_is_written_exactly() {
    for name in PresetName::ALL {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &existing_config());
        let updater = RecordingUpdater::default();

        PresetApplier::new(&path, &updater).apply(name.as_str()).unwrap();

        let expected = preset(name);
        let written = read_document(&path).unwrap();
        assert_eq!(written["collection_interval_minutes"], json!(expected.collection_interval_minutes));
        assert_eq!(
            written["collection_optimization"],
            serde_json::to_value(&expected.collection_optimization).unwrap()
        );
        assert_eq!(updater.calls.borrow().len(), 1);
    }
}

#[test]
fn unrelated_keys_survive() {
    let dir = TempDir::new().unwrap();
    let original = existing_config();
    let path = write_config(&dir, &original);

    PresetApplier::new(&path, NoopTimerUpdater).apply("medium").unwrap();

    let written = read_document(&path).unwrap();
    for (key, value) in original.as_object().unwrap() {
        if key == "collection_interval_minutes" || key == "collection_optimization" {
            continue;
        }
        assert_eq!(&written[key], value, "key {} changed", key);
    }
    assert_eq!(written.as_object().unwrap().len(), original.as_object().unwrap().len());
}

#[test]
fn large_example() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &existing_config());

    PresetApplier::new(&path, NoopTimerUpdater).apply("LARGE").unwrap();

    let written = read_document(&path).unwrap();
    assert_eq!(written["collection_interval_minutes"], json!(30));
    assert_eq!(written["collection_optimization"]["max_parallel_workers"], json!(8));
    assert_eq!(written["collection_optimization"]["node_rrd_timeframe"], json!("hour"));
}

#[test]
fn small_example() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &existing_config());

    PresetApplier::new(&path, NoopTimerUpdater).apply("small").unwrap();

    let written = read_document(&path).unwrap();
    assert_eq!(written["collection_interval_minutes"], json!(5));
    assert_eq!(written["collection_optimization"]["max_parallel_workers"], json!(3));
    assert_eq!(written["collection_optimization"]["node_rrd_timeframe"], json!("day"));
}

#[test]
fn unknown_preset_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &existing_config());
    let before = fs::read(&path).unwrap();
    let updater = RecordingUpdater::default();

    let result = PresetApplier::new(&path, &updater).apply("xlarge");

    match result {
        Err(Error::UnknownPreset { name, valid }) => {
            assert_eq!(name, "xlarge");
            assert_eq!(valid, vec!["small", "medium", "large", "custom"]);
        }
        other => panic!("expected unknown preset error, got {:?}", other),
    }
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(updater.calls.borrow().is_empty());
}

#[test]
fn listing_shows_the_four_presets() {
    let text = list_presets();
    let names: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("  ") && !line.starts_with("    "))
        .map(str::trim)
        .collect();
    assert_eq!(names, vec!["small", "medium", "large", "custom"]);
    assert!(text.contains("collection_interval_minutes: 5"));
    assert!(text.contains("collection_interval_minutes: 15"));
    assert!(text.contains("collection_interval_minutes: 30"));
}

#[test]
fn current_detects_applied_preset() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &existing_config());
    let applier = PresetApplier::new(&path, NoopTimerUpdater);

    assert_eq!(applier.current().unwrap(), None);
    applier.apply("custom").unwrap();
    assert_eq!(applier.current().unwrap(), Some(PresetName::Custom));
}

#[test]
fn unrelated_numbers_keep_their_exact_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"cluster_id": 123456789012345678901234567890, "ratio": 1e2, "threshold": 0.1}"#,
    )
    .unwrap();

    PresetApplier::new(&path, NoopTimerUpdater).apply("small").unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains(r#""cluster_id": 123456789012345678901234567890"#), "{}", written);
    assert!(written.contains(r#""ratio": 1e2"#), "{}", written);
    assert!(written.contains(r#""threshold": 0.1"#), "{}", written);
    assert!(written.contains(r#""collection_interval_minutes": 5"#), "{}", written);
}

#[cfg(unix)]
#[test]
fn apply_preset_succeeds_when_timer_helper_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &existing_config());

    let applied = apply_preset("large", &path, Path::new("false")).unwrap();

    assert_eq!(applied.preset.name, PresetName::Large);
    assert!(!applied.timer_updated);
    assert_eq!(read_document(&path).unwrap()["collection_interval_minutes"], json!(30));
}

#[cfg(unix)]
#[test]
fn apply_preset_runs_timer_helper() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &existing_config());

    let applied = apply_preset("Medium", &path, Path::new("true")).unwrap();

    assert!(applied.timer_updated);
    assert_eq!(applied.config_path, path);
}
