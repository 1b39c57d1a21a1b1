//! Tests for error handling, exit codes and suggestions.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

fn crane(cwd: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("crane");
    cmd.current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("CRANE_TEMPLATES_DIR")
        .arg("--no-color");
    cmd
}

#[test]
fn test_error_invalid_package_name() {
    let temp = TempDir::new().unwrap();
    crane(temp.path())
        .args(["new", "demo", "--lib", "--yes", "--no-git"])
        .args(["--templates", TEMPLATES, "--package-name", "Not Valid"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid package name"))
        .stderr(predicate::str::contains("@scope/name"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn test_error_non_empty_directory_without_mode() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("taken");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("notes.txt"), "keep me").unwrap();

    crane(temp.path())
        .args(["new", "taken", "--lib", "--yes", "--no-git"])
        .args(["--templates", TEMPLATES])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"))
        .stderr(predicate::str::contains("--inject"));

    assert_eq!(fs::read_to_string(project.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn test_error_missing_templates() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nowhere");

    crane(temp.path())
        .args(["new", "demo", "--lib", "--yes", "--no-git", "--templates"])
        .arg(&missing)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_error_conflicting_kinds() {
    let temp = TempDir::new().unwrap();
    crane(temp.path())
        .args(["new", "demo", "--lib", "--app"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_error_missing_version_fail_policy() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    fs::create_dir_all(templates.join("base")).unwrap();
    fs::create_dir_all(templates.join("lib")).unwrap();
    fs::write(templates.join("base/package.json"), r#"{"scripts":{}}"#).unwrap();
    fs::write(templates.join("lib/package.json"), r#"{"scripts":{"build":"tsup"}}"#).unwrap();
    fs::write(templates.join("versions.json"), r#"{"devDependencies":{}}"#).unwrap();

    crane(temp.path())
        .args(["new", "demo", "--lib", "--yes", "--no-git"])
        .arg("--templates")
        .arg(&templates)
        .args(["--missing-version", "fail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tslib"));
}

#[test]
fn test_error_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    crane(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}
