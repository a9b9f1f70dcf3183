use clap::Parser;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

use super::{execute, Cli};

const TABLE: &str = r#"
routes:
  - path: /foo
    middleware: foo
    methods: [POST]
    name: foo-create
  - path: /foo/:id
    middleware: foo
    methods: [GET]
    name: foo
"#;

fn table_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args).unwrap();
    execute(&cli)
}

#[test]
fn test_routes_prints_configs() {
    let file = table_file();
    let path = file.path().to_str().unwrap();
    let out = run(&["treebridge", "routes", "--file", path]).unwrap();

    let entries: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(entries[0]["name"], "foo-create");
    assert_eq!(entries[0]["config"]["child_routes"]["POST"]["type"], "method");
    assert_eq!(entries[1]["config"]["options"]["route"], "/foo/:id");
}

#[test]
fn test_match_prints_result() {
    let file = table_file();
    let path = file.path().to_str().unwrap();

    let out = run(&["treebridge", "match", "-f", path, "-p", "/foo/12"]).unwrap();
    let result: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(result["status"], "success");
    assert_eq!(result["matched_route_name"], "foo");
    assert_eq!(result["matched_params"]["id"], "12");

    let out = run(&["treebridge", "match", "-f", path, "-m", "delete", "-p", "/foo"]).unwrap();
    let result: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(result["status"], "failure");
    assert_eq!(result["method_failure"], true);
    assert_eq!(result["allowed_methods"], serde_json::json!(["POST"]));
}

#[test]
fn test_uri_with_params() {
    let file = table_file();
    let path = file.path().to_str().unwrap();
    let out = run(&[
        "treebridge", "uri", "-f", path, "-n", "foo", "--param", "id=bar",
    ])
    .unwrap();
    assert_eq!(out, "/foo/bar");

    assert!(run(&["treebridge", "uri", "-f", path, "-n", "nope"]).is_err());
}

#[test]
fn test_param_requires_key_value() {
    assert!(Cli::try_parse_from(["treebridge", "uri", "-f", "x", "-n", "y", "--param", "novalue"]).is_err());
}
