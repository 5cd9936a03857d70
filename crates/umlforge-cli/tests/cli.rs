use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn java_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".java").expect("create temp file");
    write!(file, "{contents}").expect("write temp file");
    file
}

#[test]
fn prints_all_diagrams_by_default() {
    let file = java_file("public class A { private int x; public void f(){} }");
    Command::cargo_bin("umlforge")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- class ---"))
        .stdout(predicate::str::contains("--- usecase ---"))
        .stdout(predicate::str::contains("--- flow ---"))
        .stdout(predicate::str::contains("class A {"));
}

#[test]
fn diagram_filter_restricts_output() {
    let file = java_file("public class A {}");
    Command::cargo_bin("umlforge")
        .unwrap()
        .args(["--diagram", "class"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- class ---"))
        .stdout(predicate::str::contains("--- flow ---").not());
}

#[test]
fn json_output_is_valid_json() {
    let file = java_file("public class A { public void f(){} }");
    let output = Command::cargo_bin("umlforge")
        .unwrap()
        .arg(file.path())
        .arg("--json")
        .output()
        .expect("run umlforge");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert!(parsed["diagrams"]["class"].is_string());
}

#[test]
fn reads_from_stdin_with_dash() {
    Command::cargo_bin("umlforge")
        .unwrap()
        .arg("-")
        .write_stdin("public class FromStdin {}")
        .assert()
        .success()
        .stdout(predicate::str::contains("FromStdin"));
}

#[test]
fn reports_unreadable_file_as_error() {
    Command::cargo_bin("umlforge")
        .unwrap()
        .arg("/nonexistent/path/Missing.java")
        .assert()
        .failure();
}
