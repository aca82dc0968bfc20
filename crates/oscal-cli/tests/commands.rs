// crates/oscal-cli/tests/commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: End-to-end tests running the `oscal` binary on local files.
// Purpose: Validate command output and failure exit codes.
// Dependencies: oscal-cli binary, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Spawns the compiled binary against documents written to a temp directory.
//! Resolution uses `file://` imports so no network is involved.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use tempfile::tempdir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn oscal_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_oscal"))
}

fn run(args: &[&str]) -> Output {
    Command::new(oscal_bin())
        .args(args)
        .env_remove("OSCAL_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run oscal")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

fn write(dir: &Path, name: &str, value: &Value) -> String {
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).expect("write fixture");
    path.to_string_lossy().into_owned()
}

fn metadata(title: &str) -> Value {
    json!({ "title": title, "version": "1.0", "oscal-version": "1.1.2" })
}

fn catalog(ids: &[&str]) -> Value {
    let controls: Vec<Value> =
        ids.iter().map(|id| json!({ "id": id, "title": format!("Control {id}") })).collect();
    json!({ "catalog": { "uuid": "cat", "metadata": metadata("Cat"), "controls": controls } })
}

fn fixture_dir() -> TempDir {
    let dir = tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("catalogs")).expect("mkdir");
    dir
}

// ============================================================================
// SECTION: Parse And Convert
// ============================================================================

#[test]
fn parse_prints_summary() {
    let dir = fixture_dir();
    let path = write(dir.path(), "cat.json", &catalog(&["ac-1", "ac-2"]));

    let output = run(&["parse", &path]);
    let summary = stdout_json(&output);

    assert_eq!(summary["document-type"], "catalog");
    assert_eq!(summary["title"], "Cat");
    assert_eq!(summary["control-count"], 2);
}

#[test]
fn parse_reports_missing_title() {
    let dir = fixture_dir();
    let value = json!({
        "catalog": { "uuid": "u1", "metadata": { "oscal-version": "1.1.2" }, "controls": [] }
    });
    let path = write(dir.path(), "bad.json", &value);

    let output = run(&["parse", &path]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("metadata.title"), "{stderr}");
}

#[test]
fn convert_prints_json_tree() {
    let dir = fixture_dir();
    let path = dir.path().join("cat.xml");
    std::fs::write(
        &path,
        r#"<catalog xmlns="http://csrc.nist.gov/ns/oscal/1.0" uuid="x">
  <metadata><title>X</title><oscal-version>1.1.2</oscal-version></metadata>
  <control id="ac-1"><title>Policy</title></control>
</catalog>"#,
    )
    .expect("write xml");

    let output = run(&["convert", &path.to_string_lossy()]);
    let tree = stdout_json(&output);

    assert_eq!(tree["catalog"]["uuid"], "x");
    assert_eq!(tree["catalog"]["controls"][0]["id"], "ac-1");
}

// ============================================================================
// SECTION: Resolve
// ============================================================================

#[test]
fn resolve_profile_uses_file_location_as_base() {
    let dir = fixture_dir();
    write(dir.path(), "catalogs/cat.json", &catalog(&["ac-1", "ac-2", "si-1"]));
    let profile = json!({
        "profile": {
            "uuid": "p",
            "metadata": metadata("Baseline"),
            "imports": [
                {
                    "href": "catalogs/cat.json",
                    "include-controls": [{ "with-ids": ["ac-1", "si-1"] }]
                },
                { "href": "catalogs/missing.json", "include-all": {} }
            ]
        }
    });
    let path = write(dir.path(), "profile.json", &profile);

    let output = run(&["resolve", &path]);
    let resolved = stdout_json(&output);

    let ids: Vec<&str> = resolved["controls"]
        .as_array()
        .expect("controls")
        .iter()
        .map(|control| control["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, vec!["ac-1", "si-1"]);
    assert_eq!(resolved["imports"][0]["status"], "loaded");
    assert_eq!(resolved["imports"][0]["control-count"], 2);
    assert_eq!(resolved["imports"][1]["status"], "error");
    assert!(
        resolved["imports"][1]["error"].as_str().expect("error").contains("file not found"),
        "{resolved}"
    );
}

#[test]
fn resolve_rejects_catalogs() {
    let dir = fixture_dir();
    let path = write(dir.path(), "cat.json", &catalog(&["ac-1"]));

    let output = run(&["resolve", &path]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("resolve requires a profile or system-security-plan"), "{stderr}");
}

#[test]
fn source_summarizes_relative_reference() {
    let dir = fixture_dir();
    write(dir.path(), "catalogs/cat.json", &catalog(&["ac-1"]));
    let base = format!("file://{}/", dir.path().to_string_lossy());

    let output = run(&["source", "catalogs/cat.json", "--base-url", &base]);
    let summary = stdout_json(&output);

    assert_eq!(summary["document-type"], "catalog");
    assert_eq!(summary["status"], "loaded");
    assert_eq!(summary["title"], "Cat");
}

// ============================================================================
// SECTION: Diff
// ============================================================================

#[test]
fn diff_reports_control_changes() {
    let dir = fixture_dir();
    let left = write(dir.path(), "left.json", &catalog(&["ac-1", "ac-2"]));
    let right = write(dir.path(), "right.json", &catalog(&["ac-1", "si-1"]));

    let output = run(&["diff", &left, &right]);
    let result = stdout_json(&output);

    assert_eq!(result["document-type"], "catalog");
    assert_eq!(result["summary"]["added"], 1);
    assert_eq!(result["summary"]["removed"], 1);
}

#[test]
fn diff_refuses_mismatched_types() {
    let dir = fixture_dir();
    let left = write(dir.path(), "cat.json", &catalog(&["ac-1"]));
    let profile = json!({
        "profile": { "uuid": "p", "metadata": metadata("P"), "imports": [{ "href": "cat.json" }] }
    });
    let right = write(dir.path(), "profile.json", &profile);

    let output = run(&["diff", &left, &right]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot compare Catalog with Profile"), "{stderr}");
}
