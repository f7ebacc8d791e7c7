//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

fn minixsd_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_minixsd"))
}

fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path.to_string_lossy().into_owned()
}

// ============================================================================
// Validate Command Tests
// ============================================================================

#[test]
fn test_cli_validate_valid_document() {
    let output = Command::new(minixsd_bin())
        .args(["validate", "--schema", &fixture("library.xsd"), &fixture("library.xml")])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "validate should succeed: {}", stdout);
    assert!(stdout.contains("Document is valid"));
}

#[test]
fn test_cli_validate_invalid_document() {
    let output = Command::new(minixsd_bin())
        .args([
            "validate",
            "--schema",
            &fixture("library.xsd"),
            &fixture("library_invalid.xml"),
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Document is invalid"));
    assert!(stdout.contains("6:5 [PATTERN_VIOLATION]"));
    assert!(stdout.contains("[MISSING_REQUIRED_ATTRIBUTE]"));
}

#[test]
fn test_cli_validate_malformed_document() {
    let output = Command::new(minixsd_bin())
        .args(["validate", "--schema", &fixture("library.xsd"), &fixture("malformed.xml")])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("4:3 [PARSE_ERROR]"));
}

#[test]
fn test_cli_validate_missing_file() {
    let output = Command::new(minixsd_bin())
        .args(["validate", "--schema", &fixture("library.xsd"), "does-not-exist.xml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: I/O error"));
}

// ============================================================================
// Parse Command Tests
// ============================================================================

#[test]
fn test_cli_parse_to_json() {
    let output = Command::new(minixsd_bin())
        .args(["parse", &fixture("library.xml")])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be JSON");
    assert_eq!(json["library"]["@name"], "City Library");
    assert_eq!(json["library"]["book"][1]["author"][1], "Neil Gaiman");
}

#[test]
fn test_cli_parse_malformed() {
    let output = Command::new(minixsd_bin())
        .args(["parse", "--pretty", &fixture("malformed.xml")])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("[PARSE_ERROR]"));
}

// ============================================================================
// Inspect Command Tests
// ============================================================================

#[test]
fn test_cli_inspect_basic() {
    let output = Command::new(minixsd_bin())
        .args(["inspect", &fixture("library.xsd")])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "inspect should succeed");
    assert!(stdout.contains("minixsd"), "should show version");
    assert!(stdout.contains("http://example.com/library"), "should show namespace");
    assert!(stdout.contains("Global Elements: 1"));
    assert!(stdout.contains("Complex Types: 2"));
    assert!(stdout.contains("Simple Types: 3"));
    assert!(stdout.contains("author : xs:string [1..unbounded]"));
}

#[test]
fn test_cli_inspect_json_output() {
    let output = Command::new(minixsd_bin())
        .args(["inspect", "--json", &fixture("library.xsd")])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be JSON");
    assert_eq!(json["targetNamespace"], "http://example.com/library");
    assert!(json["complexTypes"]["bookType"].is_object());
}

#[test]
fn test_cli_inspect_rejects_non_schema() {
    let output = Command::new(minixsd_bin())
        .args(["inspect", &fixture("library.xml")])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("[SCHEMA_ERROR]"));
}
