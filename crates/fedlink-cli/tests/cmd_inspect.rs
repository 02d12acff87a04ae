//! Integration tests for `fedlink inspect`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `fedlink` binary.
fn fedlink_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("fedlink");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

fn run_inspect(extra: &[&str]) -> std::process::Output {
    let mut args = vec![
        "inspect".to_owned(),
        "--federation".to_owned(),
        fixture("federation-small.xml").display().to_string(),
        "--registry".to_owned(),
        fixture("ror-small.json").display().to_string(),
        "--crosswalk".to_owned(),
        fixture("crosswalk-small.json").display().to_string(),
    ];
    args.extend(extra.iter().map(|s| (*s).to_owned()));
    Command::new(fedlink_bin())
        .args(&args)
        .output()
        .expect("run fedlink inspect")
}

#[test]
fn inspect_small_fixtures_exits_0() {
    let out = run_inspect(&[]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn inspect_human_counts_records_and_skips() {
    let out = run_inspect(&[]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let normalized: Vec<String> = stdout
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    // Two IdPs survive; the SP-only entity is dropped.
    assert!(normalized.contains(&"idps: 2".to_owned()), "stdout: {stdout}");
    assert!(
        normalized.contains(&"organizations: 2".to_owned()),
        "stdout: {stdout}"
    );
    // One registry link is not a URL; one crosswalk binding is incomplete.
    assert!(
        normalized.contains(&"dropped links: 1".to_owned()),
        "stdout: {stdout}"
    );
    assert!(
        normalized.contains(&"skipped bindings: 1".to_owned()),
        "stdout: {stdout}"
    );
}

#[test]
fn inspect_json_is_a_single_object() {
    let out = run_inspect(&["--format", "json"]);
    assert_eq!(out.status.code(), Some(0));
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(value["idp_count"], 2);
    assert_eq!(value["org_count"], 2);
    assert_eq!(value["pair_count"], 1);
    assert_eq!(value["skipped_links"], 1);
    assert_eq!(value["skipped_bindings"], 1);
}

#[test]
fn inspect_missing_registry_exits_2() {
    let out = Command::new(fedlink_bin())
        .args([
            "inspect",
            "--federation",
            fixture("federation-small.xml").to_str().expect("path"),
            "--registry",
            "/does/not/exist.json",
            "--crosswalk",
            fixture("crosswalk-small.json").to_str().expect("path"),
        ])
        .output()
        .expect("run fedlink inspect");
    assert_eq!(out.status.code(), Some(2));
}
