#![cfg(feature = "cli")]

//! End-to-end tests for the `mailtree-cli` binary.
//!
//! Each test writes a script to a temporary file, runs the compiled
//! `mailtree-cli` binary on it as a child process, and asserts on
//! stdout.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

const SCRIPT: &str = r#"{
    "mailboxes": [
        { "name": "A", "address": "a@x" },
        { "name": "B", "address": "b@x" }
    ],
    "steps": [
        { "op": "send", "from": "a@x", "to": "b@x", "subject": "Hi", "body": "hello" },
        { "op": "send", "from": "a@x", "to": "z@x", "subject": "Lost" },
        { "op": "create_folder", "address": "b@x", "parent": "inbox", "name": "work" },
        { "op": "move", "address": "b@x", "from": "inbox", "to": "inbox/work", "subject": "Hi" },
        { "op": "list", "address": "b@x", "path": "inbox/work" },
        { "op": "search", "address": "a@x", "criterion": "subject", "value": "lo" },
        { "op": "folders", "address": "b@x" },
        { "op": "move", "address": "b@x", "from": "inbox", "to": "sent", "index": 3 }
    ]
}"#;

fn write_script(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(text.as_bytes())
        .expect("failed to write script");
    file
}

/// Run the `mailtree-cli` binary with the given arguments. Returns
/// `(stdout, stderr, success)`.
fn run_cli(args: &[&str]) -> (String, String, bool) {
    let bin = env!("CARGO_BIN_EXE_mailtree-cli");
    let output = Command::new(bin)
        .args(args)
        .env("MAILTREE_REGISTRATION", "overwrite")
        .output()
        .expect("failed to run mailtree-cli");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

// ── Tests ──────────────────────────────────────────────────────────

#[test]
fn test_run_table() {
    let file = write_script(SCRIPT);
    let path = file.path().to_str().unwrap();

    let (stdout, _, success) = run_cli(&["run", path]);

    assert!(success, "mailtree-cli run failed");
    assert!(stdout.contains("[1] sent a@x -> b@x"));
    assert!(stdout.contains("unknown recipient z@x"));
    assert!(stdout.contains("b@x: folder inbox/work"));
    assert!(stdout.contains("b@x: moved inbox -> inbox/work"));
    assert!(stdout.contains("inbox/work"));
    assert!(stdout.contains("1 message(s)"));
    assert!(stdout.contains("[8] failed: Message not found"));
}

#[test]
fn test_run_json() {
    let file = write_script(SCRIPT);
    let path = file.path().to_str().unwrap();

    let (stdout, _, success) = run_cli(&["--json", "run", path]);

    assert!(success, "mailtree-cli --json run failed");

    let outcomes: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout is not valid JSON");
    let arr = outcomes.as_array().expect("JSON output should be an array");
    assert_eq!(arr.len(), 8);

    assert_eq!(arr[0]["outcome"], "sent");
    assert_eq!(arr[0]["delivery"]["status"], "delivered");
    assert_eq!(arr[1]["delivery"]["status"], "unknown_recipient");
    assert_eq!(arr[4]["messages"][0]["sender"], "a@x");
    // "Hi"/"hello" does not match "lo" by subject, "Lost" does.
    assert_eq!(arr[5]["messages"].as_array().unwrap().len(), 1);
    assert_eq!(arr[5]["messages"][0]["subject"], "Lost");
    assert_eq!(
        arr[6]["paths"],
        serde_json::json!(["inbox", "inbox/work", "sent"])
    );
    assert_eq!(arr[7]["outcome"], "failed");
}

#[test]
fn test_check() {
    let file = write_script(SCRIPT);
    let path = file.path().to_str().unwrap();

    let (stdout, _, success) = run_cli(&["check", path]);

    assert!(success, "mailtree-cli check failed");
    assert!(stdout.contains("2 mailbox(es), 8 step(s)"));
}

#[test]
fn test_check_rejects_bad_move() {
    let file = write_script(
        r#"{
            "mailboxes": [{ "name": "A", "address": "a@x" }],
            "steps": [{ "op": "move", "address": "a@x", "from": "inbox", "to": "sent" }]
        }"#,
    );
    let path = file.path().to_str().unwrap();

    let (_, stderr, success) = run_cli(&["check", path]);

    assert!(!success);
    assert!(stderr.contains("move needs a subject or an index"));
}

#[test]
fn test_missing_script_file() {
    let (_, _, success) = run_cli(&["run", "/nonexistent/mailtree-script.json"]);
    assert!(!success);
}
