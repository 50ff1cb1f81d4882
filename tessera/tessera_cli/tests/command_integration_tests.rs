use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn components() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "example/meta.json",
        r#"{"id": "example", "version": "0.0.1", "views": {"index": {}}}"#,
    );
    write(
        root,
        "button/1.0/meta.json",
        r#"{
            "id": "button",
            "version": "1.0",
            "css": ["/button/1.0/index.css"],
            "views": {
                "index": {"template": "<button>{{component name=\"example\" view=\"index\"}}</button>"},
                "restricted": {"controller": "index.js", "permissions": ["view_restricted"]}
            }
        }"#,
    );

    dir
}

fn tessera() -> Command {
    Command::cargo_bin("tessera").unwrap()
}

#[test]
fn test_resolve_defaults_to_host() {
    let dir = components();

    tessera()
        .args(["resolve", "--components"])
        .arg(dir.path())
        .args(["--host", "example@0.0.1", "--view", "index"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "example""#))
        .stdout(predicate::str::contains(r#""controller": "index.js""#));
}

#[test]
fn test_resolve_unauthorized_prints_error_descriptor() {
    let dir = components();

    tessera()
        .args(["resolve", "--components"])
        .arg(dir.path())
        .args(["--name", "button", "--version", "1.0", "--view", "restricted"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""controller": "401.js""#));
}

#[test]
fn test_resolve_with_session() {
    let dir = components();
    let session = dir.path().join("session.json");
    fs::write(&session, r#"{"user": {"permissions": ["view_restricted"]}}"#).unwrap();

    tessera()
        .args(["resolve", "--components"])
        .arg(dir.path())
        .args(["--name", "button", "--version", "1.0", "--view", "restricted", "--session"])
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "button""#))
        .stdout(predicate::str::contains(r#""controller": "index.js""#));
}

#[test]
fn test_resolve_rejects_bad_host() {
    let dir = components();

    tessera()
        .args(["resolve", "--components"])
        .arg(dir.path())
        .args(["--host", "example", "--view", "index"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("id@version"));
}

#[test]
fn test_render_prints_payload_with_children() {
    let dir = components();

    tessera()
        .args(["render", "--components"])
        .arg(dir.path())
        .args(["--id", "button", "--view", "index"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""css": ["#))
        .stdout(predicate::str::contains("/button/1.0/index.css"))
        .stdout(predicate::str::contains(r#""children": ["#))
        .stdout(predicate::str::contains(r#""placeholder": true"#));
}

#[test]
fn test_catalog_lists_versions_and_views() {
    let dir = components();

    tessera()
        .args(["catalog", "--components"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("button@1.0 views: index, restricted"))
        .stdout(predicate::str::contains("example@0.0.1 views: index"));
}

#[test]
fn test_catalog_of_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();

    tessera()
        .args(["catalog", "--components"])
        .arg(dir.path().join("absent"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No components found"));
}
