use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::tempdir;

const SNAPSHOT_BODY: &str = r#"{
  "hierarchy": {
    "graphene.ObjectType": ["app.schema.Query"],
    "graphene.Mutation": ["app.schema.CreateUser"]
  },
  "defines": {
    "app.schema.Query": [
      {"name": "app.schema.Query.resolve_user", "parent": "app.schema.Query",
       "parameters": [
         {"name": "self"},
         {"name": "info", "annotation": "graphql.execution.base.ResolveInfo"},
         {"name": "user_id"}
       ]},
      {"name": "app.schema.Query.helper", "parent": "app.schema.Query",
       "parameters": [{"name": "self"}]}
    ],
    "app.schema.CreateUser": [
      {"name": "app.schema.CreateUser.mutate", "parent": "app.schema.CreateUser",
       "parameters": [{"name": "self"}, {"name": "name"}]}
    ]
  }
}"#;

fn write_snapshot(body: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, body).expect("write snapshot");
    (dir, path)
}

/// End-to-end: the graphql profile finds the resolver and the mutator but
/// not the helper, and the resolver's receiver/context parameters are
/// whitelisted.
#[test]
fn generate_finds_resolver_and_mutator() {
    let (_dir, snapshot) = write_snapshot(SNAPSHOT_BODY);

    assert_cmd::cargo::cargo_bin_cmd!("taint-modelgen")
        .arg("generate")
        .arg("--profile")
        .arg("graphql")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("app.schema.Query.resolve_user"))
        .stdout(predicate::str::contains("app.schema.CreateUser.mutate"))
        .stdout(predicate::str::contains("user_id: source"))
        .stdout(predicate::str::contains("whitelisted: self, info"))
        .stdout(predicate::str::contains("helper").not());
}

/// JSON output carries the structured model records.
#[test]
fn generate_json_output_parses() {
    let (_dir, snapshot) = write_snapshot(SNAPSHOT_BODY);

    let output = assert_cmd::cargo::cargo_bin_cmd!("taint-modelgen")
        .arg("generate")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let models: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let models = models.as_array().expect("array");
    assert_eq!(models.len(), 2);

    let resolver = models
        .iter()
        .find(|m| m["callable"] == "app.schema.Query.resolve_user")
        .expect("resolver model");
    assert_eq!(resolver["return_role"], "sink");
    assert_eq!(resolver["whitelisted"], serde_json::json!(["self", "info"]));
}

/// A pass that finds zero models is a valid success, not an error.
#[test]
fn generate_with_no_matches_succeeds() {
    let (_dir, snapshot) = write_snapshot(r#"{"hierarchy": {}, "defines": {}}"#);

    assert_cmd::cargo::cargo_bin_cmd!("taint-modelgen")
        .arg("generate")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Models: (none)"));
}

/// A snapshot with no hierarchy section at all (unindexed codebase) also
/// yields an empty, successful pass.
#[test]
fn generate_with_unavailable_hierarchy_succeeds() {
    let (_dir, snapshot) = write_snapshot(r#"{"defines": {}}"#);

    assert_cmd::cargo::cargo_bin_cmd!("taint-modelgen")
        .arg("generate")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Models: (none)"));
}
