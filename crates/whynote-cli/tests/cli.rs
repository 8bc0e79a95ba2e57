use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const STORE: &str = ".whyannotations.json";

fn why(workspace: &Path) -> Command {
    let mut cmd = Command::cargo_bin("why").unwrap();
    cmd.env_remove("WHY_WORKSPACE")
        .env_remove("WHY_LOG")
        .env("WHY_AUTHOR", "Test User")
        .arg("--workspace")
        .arg(workspace);
    cmd
}

fn add(workspace: &Path, file: &str, range: &str, text: &str, tags: &str) -> String {
    let out = why(workspace)
        .args(["add", "--file", file, "--range", range, "--text", text, "--tags", tags])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}

fn stored(workspace: &Path) -> serde_json::Value {
    let data = std::fs::read_to_string(workspace.join(STORE)).unwrap();
    serde_json::from_str(&data).unwrap()
}

#[test]
fn first_use_creates_empty_store() {
    let dir = TempDir::new().unwrap();
    why(dir.path()).arg("tags").assert().success().stdout("");
    assert_eq!(stored(dir.path()), serde_json::json!({ "annotations": [] }));
}

#[test]
fn add_persists_record() {
    let dir = TempDir::new().unwrap();
    let id = add(dir.path(), "/a.ts", "0:0-0:10", "fix for #42", "bug");

    let doc = stored(dir.path());
    let records = doc["annotations"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], id.as_str());
    assert_eq!(records[0]["filePath"], "/a.ts");
    assert_eq!(records[0]["text"], "fix for #42");
    assert_eq!(records[0]["tags"], serde_json::json!(["bug"]));
    assert_eq!(records[0]["author"], "Test User");
    assert_eq!(
        records[0]["range"],
        serde_json::json!({ "startLine": 0, "startCharacter": 0, "endLine": 0, "endCharacter": 10 })
    );
}

#[test]
fn add_reads_prompts_from_stdin() {
    let dir = TempDir::new().unwrap();
    why(dir.path())
        .args(["add", "--file", "/a.ts", "--range", "4"])
        .write_stdin("keeps the cache warm\nperf, cache\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());

    let doc = stored(dir.path());
    assert_eq!(doc["annotations"][0]["text"], "keeps the cache warm");
    assert_eq!(doc["annotations"][0]["tags"], serde_json::json!(["perf", "cache"]));
}

#[test]
fn add_with_empty_text_writes_nothing() {
    let dir = TempDir::new().unwrap();
    why(dir.path())
        .args(["add", "--file", "/a.ts", "--range", "4"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout("");
    assert_eq!(stored(dir.path())["annotations"], serde_json::json!([]));
}

#[test]
fn add_rejects_reversed_range() {
    let dir = TempDir::new().unwrap();
    why(dir.path())
        .args(["add", "--file", "/a.ts", "--range", "5-2", "--text", "x"])
        .assert()
        .failure();
}

#[test]
fn list_groups_by_line() {
    let dir = TempDir::new().unwrap();
    let a = add(dir.path(), "/a.ts", "3", "later line", "");
    let b = add(dir.path(), "/a.ts", "0", "first line", "");

    let out = why(dir.path())
        .args(["list", "--file", "/a.ts", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let nodes: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(nodes[0]["annotationId"], b.as_str());
    assert_eq!(nodes[1]["annotationId"], a.as_str());
}

#[test]
fn edit_updates_text_and_keeps_identity() {
    let dir = TempDir::new().unwrap();
    let id = add(dir.path(), "/a.ts", "0:0-0:10", "old", "bug");
    let before = stored(dir.path())["annotations"][0].clone();

    why(dir.path())
        .args(["edit", id.as_str(), "--text", "new text", "--tags", ""])
        .assert()
        .success()
        .stdout(format!("updated {}\n", id));

    let after = stored(dir.path())["annotations"][0].clone();
    assert_eq!(after["text"], "new text");
    assert_eq!(after["tags"], serde_json::json!([]));
    for key in ["id", "filePath", "range", "author", "createdAt"] {
        assert_eq!(after[key], before[key], "{} changed", key);
    }
}

#[test]
fn edit_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "/a.ts", "0", "keep me", "");
    why(dir.path())
        .args(["edit", "missing", "--text", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("annotation not found: missing"));
    assert_eq!(stored(dir.path())["annotations"][0]["text"], "keep me");
}

#[test]
fn delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let id = add(dir.path(), "/a.ts", "0", "doomed", "");

    why(dir.path())
        .args(["delete", id.as_str()])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout("");
    assert_eq!(stored(dir.path())["annotations"].as_array().unwrap().len(), 1);

    why(dir.path())
        .args(["delete", id.as_str()])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(format!("deleted {}\n", id));
    assert_eq!(stored(dir.path())["annotations"], serde_json::json!([]));

    why(dir.path())
        .args(["reveal", id.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("annotation not found"));
}

#[test]
fn reveal_prints_location_and_hover() {
    let dir = TempDir::new().unwrap();
    let id = add(dir.path(), "/src/a.ts", "9:4-9:20", "guard empty input", "edge");
    why(dir.path())
        .args(["reveal", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/src/a.ts:10:5\n"))
        .stdout(predicate::str::contains("**Why:** guard empty input"))
        .stdout(predicate::str::contains("**Tags:** edge"));
}

#[test]
fn decorations_for_file() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "/a.ts", "7", "late", "");
    add(dir.path(), "/a.ts", "2", "early", "");
    add(dir.path(), "/b.ts", "0", "elsewhere", "");

    let out = why(dir.path())
        .args(["decorations", "--file", "/a.ts", "--json"])
        .output()
        .unwrap();
    let decos: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let decos = decos.as_array().unwrap();
    assert_eq!(decos.len(), 2);
    assert_eq!(decos[0]["range"]["startLine"], 2);
    assert_eq!(decos[1]["range"]["startLine"], 7);
}

#[test]
fn corrupt_store_is_reported_and_left_alone() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(STORE), "not valid json {{{").unwrap();
    why(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(STORE)).unwrap(),
        "not valid json {{{"
    );
}

#[test]
fn missing_workspace_fails() {
    let dir = TempDir::new().unwrap();
    why(&dir.path().join("nope"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}
