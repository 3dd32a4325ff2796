//! Tests for the read-only check command.
#![allow(clippy::unwrap_used)]

use delog::cli::OutputOptions;
use delog::commands::{run_check, CheckOptions};
use std::fs;
use tempfile::tempdir;

fn run(targets: &[std::path::PathBuf], options: &CheckOptions) -> (i32, String) {
    let mut buffer = Vec::new();
    let code = run_check(targets, options, &mut buffer).unwrap();
    (code, String::from_utf8(buffer).unwrap())
}

#[test]
fn clean_tree_passes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.ts"), "work();\nrender();\n").unwrap();

    let (code, output) = run(&[dir.path().to_path_buf()], &CheckOptions::default());
    assert_eq!(code, 0);
    assert!(output.contains("No console calls found"));
}

#[test]
fn remaining_calls_fail_with_line_numbers() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.ts"),
        "work();\nconsole.log('left');\nmore();\nconsole.error(err);\n",
    )
    .unwrap();

    let (code, output) = run(&[dir.path().to_path_buf()], &CheckOptions::default());
    assert_eq!(code, 1);
    assert!(output.contains("app.ts"));
    assert!(output.contains("console.log"));
    assert!(output.contains("console.error"));
    // Line numbers from the findings table.
    assert!(output.contains('2'));
    assert!(output.contains('4'));
    assert!(output.contains("occurrence(s) found"));
}

#[test]
fn detection_tolerates_whitespace_and_case() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.js"), "Console.Log  ('loud');\n").unwrap();

    let (code, _) = run(&[dir.path().to_path_buf()], &CheckOptions::default());
    assert_eq!(code, 1);
}

#[test]
fn custom_patterns_replace_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.ts"),
        "logger.debug('x');\nconsole.log('y');\n",
    )
    .unwrap();

    let options = CheckOptions {
        patterns: vec!["logger.debug".to_owned()],
        ..CheckOptions::default()
    };
    let (code, output) = run(&[dir.path().to_path_buf()], &options);
    assert_eq!(code, 1);
    assert!(output.contains("logger.debug"));
    // console.log is not audited when custom patterns are given.
    assert!(!output.contains("console.log("));
}

#[test]
fn undecodable_file_is_reported_and_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.js"), [0xc3, 0x28]).unwrap();
    fs::write(dir.path().join("good.js"), "work();\n").unwrap();

    let (code, output) = run(&[dir.path().to_path_buf()], &CheckOptions::default());
    assert_eq!(code, 0);
    assert!(output.contains("skipped"));
    assert!(output.contains("not valid UTF-8"));
}

#[test]
fn json_output_lists_findings() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.ts"), "console.log(1);\n").unwrap();

    let options = CheckOptions {
        output: OutputOptions {
            json: true,
            ..OutputOptions::default()
        },
        ..CheckOptions::default()
    };
    let (code, output) = run(&[dir.path().to_path_buf()], &options);
    assert_eq!(code, 1);

    let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["files_scanned"], 1);
    assert_eq!(doc["files_flagged"], 1);
    assert_eq!(doc["total_findings"], 1);
    let finding = &doc["files"][0]["findings"][0];
    assert_eq!(finding["pattern"], "console.log");
    assert_eq!(finding["line"], 1);
    assert_eq!(finding["matched_text"], "console.log(");
}

#[test]
fn audit_over_reports_string_content_by_design() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.ts"),
        "const s = \"console.log(x)\";\n",
    )
    .unwrap();

    // The audit gate flags pattern text even inside string data.
    let (code, _) = run(&[dir.path().to_path_buf()], &CheckOptions::default());
    assert_eq!(code, 1);
}
