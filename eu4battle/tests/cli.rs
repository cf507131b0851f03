// The cargo_bin! macro requires build script setup that's overkill for simple tests.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn scenario(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write scenario");
    file
}

fn eu4battle() -> Command {
    Command::cargo_bin("eu4battle").expect("binary built")
}

const ONE_ON_ONE: &str = r#"{
    "attacker": {"name": "Sweden", "infantry": {"count": 1}},
    "defender": {"name": "Denmark", "infantry": {"count": 1}}
}"#;

#[test]
fn test_help_flag() {
    eu4battle()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--scenario"));
}

#[test]
fn test_table_output() {
    let file = scenario(ONE_ON_ONE);
    eu4battle()
        .arg("--scenario")
        .arg(file.path())
        .arg("--roll")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Sweden vs Denmark"))
        .stdout(predicate::str::contains("Outcome: both armies broke"));
}

#[test]
fn test_json_output_starts_at_day_zero() {
    let file = scenario(ONE_ON_ONE);
    let output = eu4battle()
        .arg("--scenario")
        .arg(file.path())
        .arg("--seed")
        .arg("11")
        .arg("--json")
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["history"][0]["day"], 0);
    assert_eq!(report["history"][0]["attacker"]["strength"], 1000);
    let days = report["days"].as_u64().expect("days");
    assert_eq!(report["history"].as_array().map(Vec::len), Some(days as usize + 1));
}

#[test]
fn test_max_days_override() {
    let file = scenario(ONE_ON_ONE);
    eu4battle()
        .arg("--scenario")
        .arg(file.path())
        .arg("--roll")
        .arg("0")
        .arg("--max-days")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Outcome: stalemate after 2 days"));
}

#[test]
fn test_roll_conflicts_with_seed() {
    let file = scenario(ONE_ON_ONE);
    eu4battle()
        .arg("--scenario")
        .arg(file.path())
        .arg("--roll")
        .arg("3")
        .arg("--seed")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_scenario_reports_path() {
    eu4battle()
        .arg("--scenario")
        .arg("/nonexistent/battle.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent"));
}

#[test]
fn test_unknown_terrain_override() {
    let file = scenario(ONE_ON_ONE);
    eu4battle()
        .arg("--scenario")
        .arg(file.path())
        .arg("--terrain")
        .arg("ocean")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown terrain 'ocean'"));
}

#[test]
fn test_empty_army_is_an_error() {
    let file = scenario(r#"{"attacker": {"infantry": {"count": 2}}, "defender": {}}"#);
    eu4battle()
        .arg("--scenario")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Defender army has no regiments"));
}

#[test]
fn test_bundled_scenario_runs() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../scenarios/castile_granada.json");
    eu4battle()
        .arg("--scenario")
        .arg(path)
        .arg("--seed")
        .arg("1444")
        .assert()
        .success()
        .stdout(predicate::str::contains("Castile vs Granada"));
}
