use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn mdcheck() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mdcheck"))
}

#[test]
fn check_valid_document_exits_zero() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("README.md"),
        "# Title\n\n## Overview\nSome text.\n",
    );

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("0 error(s)"));
}

#[test]
fn check_broken_link_fails_with_path_and_line() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("README.md"),
        "# Title\n\nSee [missing](./missing.md).\n",
    );

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("--no-color")
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("README.md:3: [BROKEN_LINK]"));
}

#[test]
fn check_broken_anchor_reported() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("README.md"),
        "# Title\n\n## Getting Started\n\n[ok](#getting-started)\n[bad](#nonexistent)\n",
    );

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("--no-color")
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("README.md:6: [BROKEN_ANCHOR]"))
        .stdout(predicate::str::contains("#nonexistent"));
}

#[test]
fn check_jsonl_output_is_parseable() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "## no h1 here\n");

    let mut cmd = mdcheck();
    cmd.arg("--root")
        .arg(temp.path())
        .arg("--format")
        .arg("jsonl")
        .arg("check");

    let assert = cmd.assert().failure();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("code").and_then(|c| c.as_str()), Some("NO_H1"));
    assert_eq!(items[0].get("path").and_then(|p| p.as_str()), Some("a.md"));
}

#[test]
fn check_fenced_hash_is_not_a_heading() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("README.md"),
        "# Title\n\n```sh\n# just a shell comment\n```\n",
    );

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("check")
        .assert()
        .success();
}

#[test]
fn check_empty_tree_skips_unless_strict() {
    let temp = tempdir().unwrap();

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("no candidate documents"));

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("check")
        .arg("--strict")
        .assert()
        .failure();
}

#[test]
fn check_explicit_missing_document_fails() {
    let temp = tempdir().unwrap();

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("--no-color")
        .arg("check")
        .arg("nope.md")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[DOCUMENT_NOT_FOUND]"));
}

#[test]
fn check_required_section_flag() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("README.md"), "# Title\n\n## Overview\n");

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("check")
        .arg("--require-section")
        .arg("overview")
        .assert()
        .success();

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("--no-color")
        .arg("check")
        .arg("--require-section")
        .arg("installation")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[MISSING_SECTION]"));
}

#[test]
fn check_placeholder_warning_does_not_fail() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("README.md"), "# Title\n\nThis is TBD.\n");

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("--no-color")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("[PLACEHOLDER]"));
}

#[test]
fn discover_ranks_specific_document_first() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("README.md"), "# A\n");
    write_file(&temp.path().join("docs/pipeline.md"), "# B\n");

    let mut cmd = mdcheck();
    cmd.arg("--root").arg(temp.path()).arg("discover");

    let assert = cmd.assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let paths: Vec<_> = stdout.lines().collect();

    assert_eq!(paths, vec!["docs/pipeline.md", "README.md"]);
}

#[test]
fn discover_jsonl_includes_scores() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("docs/guide.md"), "# A\n");

    let mut cmd = mdcheck();
    cmd.arg("--root")
        .arg(temp.path())
        .arg("--format")
        .arg("jsonl")
        .arg("discover");

    let assert = cmd.assert().success();
    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert!(items[0].get("score").and_then(|s| s.as_i64()).is_some());
}

#[test]
fn headings_command_emits_levels_and_slugs() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("doc.md"),
        "# Title\n\n## Getting Started\n",
    );

    let mut cmd = mdcheck();
    cmd.arg("--root")
        .arg(temp.path())
        .arg("--format")
        .arg("jsonl")
        .arg("headings")
        .arg("doc.md");

    let assert = cmd.assert().success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("level").and_then(|l| l.as_u64()), Some(1));
    assert_eq!(
        items[1].get("slug").and_then(|s| s.as_str()),
        Some("getting-started")
    );
}

#[test]
fn headings_markdown_format_renders_list() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("doc.md"), "# Title\n");

    mdcheck()
        .arg("--root")
        .arg(temp.path())
        .arg("--format")
        .arg("md")
        .arg("headings")
        .arg("doc.md")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- `#` Title (line 1, anchor `#title`)",
        ));
}

#[test]
fn links_command_classifies_targets() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("doc.md"),
        "[a](https://example.com) [b](docs/x.md#setup) [c](#local)\n",
    );

    let mut cmd = mdcheck();
    cmd.arg("--root")
        .arg(temp.path())
        .arg("--format")
        .arg("jsonl")
        .arg("links")
        .arg("doc.md");

    let assert = cmd.assert().success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 3);
    let kinds: Vec<_> = items
        .iter()
        .map(|i| i.get("kind").and_then(|k| k.as_str()).unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["external", "relative", "anchor-only"]);
    assert_eq!(
        items[1].get("fragment").and_then(|f| f.as_str()),
        Some("setup")
    );
}

#[test]
fn slug_command_prints_anchor() {
    mdcheck()
        .arg("slug")
        .arg("What's New?")
        .assert()
        .success()
        .stdout("whats-new\n");
}

#[test]
fn check_reports_all_documents_not_just_first_failure() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "## broken a\n");
    write_file(&temp.path().join("b.md"), "## broken b\n");

    let mut cmd = mdcheck();
    cmd.arg("--root")
        .arg(temp.path())
        .arg("--format")
        .arg("jsonl")
        .arg("check");

    let assert = cmd.assert().failure();
    let items = parse_jsonl(&assert.get_output().stdout);

    let paths: Vec<_> = items
        .iter()
        .map(|i| i.get("path").and_then(|p| p.as_str()).unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["a.md", "b.md"]);
}
