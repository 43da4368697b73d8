#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn write_config(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("eval.yaml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn offline_run_prints_summary_and_writes_outputs() {
    let dir = tempdir().unwrap();
    let chart = dir.path().join("levels.json");
    let cfg = write_config(
        dir.path(),
        &format!(
            r#"
remote: {{ name: Judge, provider: fake, model: judge, response: "Score: 8/10" }}
local_models:
  - {{ name: Echo, provider: fake, model: echo, response: "42" }}
chart_path: {}
"#,
            chart.display()
        ),
    );

    Command::cargo_bin("skilleval")
        .unwrap()
        .env("SKILLEVAL_CONFIG", &cfg)
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill level summary (average scores):"))
        .stdout(predicate::str::contains("  Echo - summarization: 8.00"))
        .stdout(predicate::str::contains("  Echo - reasoning: 8.00"));

    let chart_json: Value = serde_json::from_str(&fs::read_to_string(&chart).unwrap()).unwrap();
    assert_eq!(chart_json["regions"].as_array().unwrap().len(), 3);
    assert_eq!(chart_json["y_axis"], serde_json::json!([0.0, 10.0]));

    let report: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("levels.report.json")).unwrap())
            .unwrap();
    assert_eq!(report["grading_calls"], 6);
}

#[test]
fn dynamic_flag_with_unparsable_generation_yields_empty_summary() {
    let dir = tempdir().unwrap();
    let chart = dir.path().join("levels.json");
    let cfg = write_config(
        dir.path(),
        &format!(
            r#"
remote: {{ name: Judge, provider: fake, model: judge, response: "not json" }}
local_models:
  - {{ name: Echo, provider: fake, model: echo, response: "42" }}
chart_path: {}
"#,
            chart.display()
        ),
    );

    Command::cargo_bin("skilleval")
        .unwrap()
        .arg("--dynamic")
        .env("SKILLEVAL_CONFIG", &cfg)
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill level summary (average scores):"))
        .stdout(predicate::str::contains("Echo -").not());
}

#[test]
fn unsupported_model_type_fails_before_evaluation() {
    let dir = tempdir().unwrap();
    let cfg = write_config(
        dir.path(),
        r#"
remote: { name: Judge, provider: fake, model: judge }
local_models:
  - { name: Odd, provider: llamacpp, model: x }
"#,
    );

    Command::cargo_bin("skilleval")
        .unwrap()
        .env("SKILLEVAL_CONFIG", &cfg)
        .env("RUST_LOG", "off")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported model type 'llamacpp'"))
        .stdout(predicate::str::contains("Skill level summary").not());
}

#[test]
fn unknown_flag_is_rejected() {
    Command::cargo_bin("skilleval")
        .unwrap()
        .arg("--parallel")
        .assert()
        .failure();
}
