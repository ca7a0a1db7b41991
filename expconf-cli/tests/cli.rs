//! Integration tests for the expconf commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;

// ============================================================================
// dump
// ============================================================================

#[test]
fn test_dump_resolves_inheritance() {
    let env = TestEnv::new();
    env.write("b.yaml", "x: 1\nlist: [1, 2]\n");
    let a = env.write("a.yaml", "__inherit__: [b.yaml]\nlist: [3, 4]\nx!: 9\n");

    let config = env.dump_json(&[&a]);
    assert_eq!(
        config,
        json!({"x": 9, "list": [1, 2, 3, 4], "experiment_name": "a"})
    );
}

#[test]
fn test_dump_multiple_configs_later_wins() {
    let env = TestEnv::new();
    let base = env.write("base.yaml", "optimizer:\n  name: sgd\n  lr: 0.1\n");
    let tweak = env.write("tweak.toml", "[optimizer]\nlr = 0.01\n");

    let config = env.dump_json(&[&base, &tweak]);
    assert_eq!(config["optimizer"], json!({"name": "sgd", "lr": 0.01}));
    assert_eq!(config["experiment_name"], json!("base"));
}

#[test]
fn test_dump_yaml_is_default() {
    let env = TestEnv::new();
    let file = env.write("run.json", r#"{"seed": 7}"#);

    env.command_with(&[&file])
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed: 7"))
        .stdout(predicate::str::contains("experiment_name: run"));
}

#[test]
fn test_dump_toml() {
    let env = TestEnv::new();
    let file = env.write("run.yaml", "train:\n  epochs: 3\n");

    env.command_with(&[&file])
        .args(["dump", "--format", "toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[train]"))
        .stdout(predicate::str::contains("epochs = 3"));
}

#[test]
fn test_cfg_alias() {
    let env = TestEnv::new();
    let file = env.write("run.yaml", "a: 1\n");

    env.command()
        .arg("--cfg")
        .arg(&file)
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("a: 1"));
}

#[test]
fn test_dump_substitutes_variables() {
    let env = TestEnv::new();
    let file = env.write(
        "vars.yaml",
        "__variables__:\n  root: /data\n  n: 4\nworkers: ${n}\nout: ${root}/out\n",
    );

    let config = env.dump_json(&[&file]);
    assert_eq!(config["workers"], json!(4));
    assert_eq!(config["out"], json!("/data/out"));
    assert!(config.get("__variables__").is_none());
}

#[test]
fn test_keep_variables_flag() {
    let env = TestEnv::new();
    let file = env.write("vars.yaml", "__variables__:\n  n: 4\nworkers: ${n}\n");

    let output = env
        .command_with(&[&file])
        .args(["--keep-variables", "dump", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["__variables__"], json!({"n": 4}));
}

// ============================================================================
// order
// ============================================================================

#[test]
fn test_order_lists_ancestors_first() {
    let env = TestEnv::new();
    env.write("base.yaml", "a: 1\n");
    env.write("mid.yaml", "__inherit__: base.yaml\n");
    let leaf = env.write("leaf.yaml", "__inherit__: mid.yaml\n");

    let output = env.command_with(&[&leaf]).arg("order").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<_> = stdout
        .lines()
        .map(|line| {
            Path::new(line)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec!["base.yaml", "mid.yaml", "leaf.yaml"]);
}

#[test]
fn test_order_edges() {
    let env = TestEnv::new();
    env.write("base.yaml", "a: 1\n");
    let leaf = env.write("leaf.yaml", "__inherit__: base.yaml\n");

    env.command_with(&[&leaf])
        .args(["order", "--edges"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leaf.yaml -> "))
        .stdout(predicate::str::contains("base.yaml"));
}

// ============================================================================
// get
// ============================================================================

#[test]
fn test_get_scalar() {
    let env = TestEnv::new();
    let file = env.write("run.yaml", "model:\n  layers: [64, 128]\n  name: mlp\n");

    env.command_with(&[&file])
        .args(["get", "model.layers.1"])
        .assert()
        .success()
        .stdout("128\n");

    env.command_with(&[&file])
        .args(["get", "model.name"])
        .assert()
        .success()
        .stdout("mlp\n");
}

#[test]
fn test_get_container_as_json() {
    let env = TestEnv::new();
    let file = env.write("run.yaml", "model:\n  layers: [64, 128]\n");

    let output = env
        .command_with(&[&file])
        .args(["get", "model", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, json!({"layers": [64, 128]}));
}

#[test]
fn test_get_missing_key_exits_one() {
    let env = TestEnv::new();
    let file = env.write("run.yaml", "a: 1\n");

    env.command_with(&[&file])
        .args(["get", "b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("key not found: b"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn test_completions_without_config() {
    let env = TestEnv::new();
    env.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expconf"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("expconf"));
}
