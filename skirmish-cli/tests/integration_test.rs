//! Integration tests for the skirmish binary
//!
//! Runs the compiled CLI against the fixtures in tests/fixtures.

use serde_json::Value;
use std::path::PathBuf;
use std::process::{Command, Output};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn skirmish(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skirmish"))
        .args(args)
        .output()
        .expect("failed to run skirmish binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// COMMANDS
// ============================================================================

#[test]
fn test_locate_origin() {
    let output = skirmish(&["locate", "--x", "0", "--y", "0"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("0,0 "));
}

#[test]
fn test_locate_negative_pixels() {
    // One hex west of the origin with the default 40px layout
    let output = skirmish(&["locate", "--x", "-69.3", "--y", "0"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("-1,0 "));
}

#[test]
fn test_inspect_fixture() {
    let state = fixture("state.json");
    let output = skirmish(&["inspect", "--state", state.to_str().unwrap()]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("[menu: more actions]"));
    assert!(text.contains("(preview: Smash)"));
    assert!(text.trim_end().ends_with("button  [act: skip]"));
}

#[test]
fn test_inspect_json_covers_board() {
    let state = fixture("state.json");
    let output = skirmish(&["inspect", "--state", state.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let cells = json["cells"].as_object().unwrap();
    assert_eq!(cells.len(), 19);
    assert_eq!(cells["1,0"]["actions"][0]["kind"], "activate");
}

#[test]
fn test_replay_fixture() {
    let state = fixture("state.json");
    let script = fixture("script.json");
    let output = skirmish(&[
        "replay",
        "--state",
        state.to_str().unwrap(),
        "--script",
        script.to_str().unwrap(),
        "--strict",
    ]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["responses"],
        serde_json::json!([
            {"index": 2, "target": {"index": 0}},
            {"index": 0, "target": null}
        ])
    );
}

#[test]
fn test_missing_config_fails() {
    let output = skirmish(&["--config", "/nonexistent/config.json", "locate", "--x", "0", "--y", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}
