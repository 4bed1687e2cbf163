use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;
use tempfile::NamedTempFile;

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_datum") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("datum{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_datum is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary file should be created");
    file.write_all(content.as_bytes())
        .expect("temporary file should be written");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("datum should execute")
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn upload() -> String {
    json!([
        {"type": "bolus", "subType": "normal", "time": "2024-03-01T12:00:00+02:00", "normal": 4},
        {"type": "bolus", "subType": "square", "time": "2024-03-01T10:00:00Z", "duration": 3_600_000, "extended": 150}
    ])
    .to_string()
}

#[test]
fn test_validate_reports_pointers_and_fails() {
    let input = fixture(&upload());
    let output = run(&["validate", &path_arg(input.path())]);

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report["acceptedCount"], 1);
    assert_eq!(report["records"][0]["status"], "accepted");
    assert_eq!(report["records"][1]["status"], "rejected");
    assert_eq!(report["records"][1]["errors"][0]["source"]["pointer"], "/extended");
    assert_eq!(report["records"][1]["errors"][0]["code"], "out-of-range");
}

#[test]
fn test_validate_clean_upload_succeeds() {
    let input = fixture(
        &json!({"type": "basal", "deliveryType": "scheduled", "time": "2024-03-01T10:00:00Z", "duration": 3_600_000, "rate": 0.8})
            .to_string(),
    );
    let output = run(&["validate", &path_arg(input.path())]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_json(&output)["rejectedCount"], 0);
}

#[test]
fn test_unknown_fields_flag() {
    let input = fixture(
        &json!({"data": {"type": "basal", "deliveryType": "suspend", "time": "2024-03-01T10:00:00Z", "duration": 0, "note": "x"}})
            .to_string(),
    );

    let rejected = run(&["validate", &path_arg(input.path()), "--pointer", "/data"]);
    assert_eq!(rejected.status.code(), Some(1));
    assert_eq!(stdout_json(&rejected)["records"][0]["errors"][0]["code"], "not-parsed");

    let allowed = run(&["validate", &path_arg(input.path()), "--pointer", "/data", "--allow-unknown-fields"]);
    assert!(allowed.status.success());
    assert_eq!(stdout_json(&allowed)["records"][0]["warnings"][0]["source"]["pointer"], "/note");

    let strict = run(&[
        "validate",
        &path_arg(input.path()),
        "--pointer",
        "/data",
        "--allow-unknown-fields",
        "--strict",
    ]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_normalize_writes_accepted_records() {
    let input = fixture(&upload());
    let destination = NamedTempFile::new().expect("temporary file should be created");
    let output = run(&[
        "normalize",
        &path_arg(input.path()),
        "--output",
        &path_arg(destination.path()),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(destination.path()).unwrap()).unwrap();
    let records = written.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["time"], "2024-03-01T10:00:00Z");
    assert!(records[0]["id"].is_string());
}

#[test]
fn test_config_file_fail_all_policy() {
    let input = fixture(&upload());
    let config = fixture("log_level: warn\npipeline:\n  acceptance_policy: fail-all\n");
    let output = run(&[
        "--config",
        &path_arg(config.path()),
        "normalize",
        &path_arg(input.path()),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn test_policy_flag_overrides_config() {
    let input = fixture(&upload());
    let config = fixture("pipeline:\n  acceptance_policy: fail-all\n");
    let output = run(&[
        "--config",
        &path_arg(config.path()),
        "normalize",
        &path_arg(input.path()),
        "--policy",
        "partial",
    ]);

    assert_eq!(stdout_json(&output).as_array().map(Vec::len), Some(1));
}

#[test]
fn test_variants_lists_every_discriminator() {
    let output = run(&["variants"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "type=basal deliveryType=scheduled",
            "type=basal deliveryType=temp",
            "type=basal deliveryType=suspend",
            "type=bolus subType=normal",
            "type=bolus subType=square",
            "type=bolus subType=dual/square",
        ]
    );
}

#[test]
fn test_missing_input_is_an_error() {
    let output = run(&["validate", "/path/that/does/not/exist.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load"));
}
