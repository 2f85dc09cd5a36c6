use assert_cmd::prelude::*;

use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper to create a Command for the `ergofinder` binary, isolated from any local or user config
fn ergofinder_cmd(home: &TempDir) -> Command {
  let mut cmd = Command::cargo_bin("ergofinder").expect("binary exists");
  cmd.current_dir(home.path());
  cmd.env("HOME", home.path());
  cmd.env("XDG_CONFIG_HOME", home.path().join(".config"));
  cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
  let output = cmd.output().unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_models_lists_catalog() {
  let home = TempDir::new().unwrap();

  ergofinder_cmd(&home)
    .args(["models"])
    .assert()
    .success()
    .stdout(contains("726XLFP").and(contains("12 models")));

  let json = stdout_json(ergofinder_cmd(&home).args(["models", "--format", "json"]));
  let models = json.as_array().unwrap();
  assert_eq!(models.len(), 12);
  assert_eq!(models[0]["key"], "700");
  assert_eq!(models[0]["applicationType"], "Manual Operation");
}

#[test]
fn test_questions_lists_options() {
  let home = TempDir::new().unwrap();

  ergofinder_cmd(&home)
    .args(["questions"])
    .assert()
    .success()
    .stdout(contains("medium-heavy").and(contains("no-preference")));
}

#[test]
fn test_recommend_json() {
  let home = TempDir::new().unwrap();

  let json = stdout_json(ergofinder_cmd(&home).args([
    "recommend",
    "--duty",
    "manual",
    "--budget",
    "economy",
    "--battery",
    "manual",
    "--volume",
    "low",
    "--features",
    "basic",
    "--format",
    "json",
  ]));

  let results = json.as_array().unwrap();
  assert!(results.len() <= 3);
  assert_eq!(results[0]["productKey"], "700");
  assert_eq!(results[0]["score"], 95);
  assert_eq!(results[0]["reasons"].as_array().unwrap().len(), 3);
}

#[test]
fn test_recommend_rejects_unknown_option() {
  let home = TempDir::new().unwrap();

  ergofinder_cmd(&home)
    .args([
      "recommend",
      "--duty",
      "extreme",
      "--budget",
      "economy",
      "--battery",
      "manual",
      "--volume",
      "low",
      "--features",
      "basic",
    ])
    .assert()
    .failure()
    .stderr(contains("not a valid option"));
}

#[test]
fn test_recommend_uses_config_limits() {
  let home = TempDir::new().unwrap();
  let config_path = home.path().join("limits.json");
  fs::write(&config_path, r#"{ "scoring": { "max_results": 1 } }"#).unwrap();

  let json = stdout_json(ergofinder_cmd(&home).args([
    "recommend",
    "--duty",
    "light",
    "--budget",
    "flexible",
    "--battery",
    "lead-fleece",
    "--volume",
    "high",
    "--features",
    "advanced",
    "--format",
    "json",
    "--config",
    config_path.to_str().unwrap(),
  ]));
  let results = json.as_array().unwrap();
  assert_eq!(results.len(), 1);
  assert_eq!(results[0]["productKey"], "726X");
}

#[test]
fn test_compare_pretty_and_json() {
  let home = TempDir::new().unwrap();

  ergofinder_cmd(&home)
    .args(["compare", "726E", "726X"])
    .assert()
    .success()
    .stdout(contains("Chain Speed").and(contains("66 m/min")));

  let json = stdout_json(ergofinder_cmd(&home).args(["compare", "726E", "700", "--format", "json"]));
  assert_eq!(json["models"], serde_json::json!(["726E", "700"]));
  let performance = &json["sections"][2];
  assert_eq!(performance["categoryLabel"], "Performance");
  assert_eq!(performance["rows"][0]["values"][1], serde_json::Value::Null);
}

#[test]
fn test_compare_json_marks_best_range() {
  let home = TempDir::new().unwrap();

  let json = stdout_json(ergofinder_cmd(&home).args(["compare", "700", "GO", "--format", "json"]));
  let width = &json["sections"][1]["rows"][0];
  assert_eq!(width["attributeLabel"], "Pallet Width Range");
  assert_eq!(width["tags"], serde_json::json!(["equal", "worse"]));
  assert_eq!(width["best"], 0);

  let application = &json["sections"][0]["rows"][1];
  assert_eq!(application["attributeLabel"], "Application Type");
  assert!(application.get("best").is_none());
}

#[test]
fn test_compare_filter_differences() {
  let home = TempDir::new().unwrap();

  let json = stdout_json(ergofinder_cmd(&home).args([
    "compare",
    "713E",
    "726E",
    "--filter",
    "differences",
    "--format",
    "json",
  ]));
  let rows: Vec<&serde_json::Value> =
    json["sections"].as_array().unwrap().iter().flat_map(|section| section["rows"].as_array().unwrap()).collect();
  assert!(!rows.is_empty());
  assert!(rows.iter().all(|row| row["isDifferent"] == true));
  assert_eq!(json["stats"]["differences"].as_u64().unwrap() as usize, rows.len());
}

#[test]
fn test_compare_rejects_selection_size() {
  let home = TempDir::new().unwrap();

  ergofinder_cmd(&home)
    .args(["compare", "700", "700E", "700X", "713E", "713X"])
    .assert()
    .failure()
    .stderr(contains("between 2 and 4"));

  ergofinder_cmd(&home).args(["compare", "726E"]).assert().failure();
}

#[test]
fn test_compare_unknown_model() {
  let home = TempDir::new().unwrap();

  ergofinder_cmd(&home)
    .args(["compare", "726E", "999Z"])
    .assert()
    .failure()
    .stderr(contains("Unknown model '999Z'"));
}

#[test]
fn test_external_catalog_errors_are_reported() {
  let home = TempDir::new().unwrap();
  let catalog_path = home.path().join("catalog.json");
  fs::write(&catalog_path, "{}").unwrap();

  ergofinder_cmd(&home)
    .args(["models", "--catalog", catalog_path.to_str().unwrap()])
    .assert()
    .failure()
    .stderr(contains("Failed to load catalog").and(contains("no products")));
}
