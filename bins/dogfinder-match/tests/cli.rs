use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dogfinder-match").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("DOGFINDER_LOG");
    cmd
}

fn write(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

fn sightings() -> Value {
    json!([
        {
            "id": "near-husky",
            "breed": "husky siberiano",
            "location": {"latitude": 19.4326, "longitude": -99.1332},
            "createdAt": "2024-05-01T12:00:00Z"
        },
        {
            "id": "far-pug",
            "breed": "pug",
            "location": "{\"latitude\":20.5,\"longitude\":-99.1332}",
            "aiTags": "[{\"className\":\"pug\",\"probability\":0.9}]",
            "createdAt": "2024-05-03T12:00:00Z"
        }
    ])
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("rank"))
        .stdout(predicate::str::contains("alert"));
}

#[test]
fn test_similar_family_match() {
    let dir = TempDir::new().unwrap();
    let output = cmd(dir.path())
        .args(["--format", "json", "similar", "Husky", "Pomeranian"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output.stdout);
    assert_eq!(body["similar"], true);
    assert_eq!(body["tier"], "family");
}

#[test]
fn test_similar_text() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["similar", "Husky", "Chihuahua"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not similar"));
}

#[test]
fn test_score_explain() {
    let dir = TempDir::new().unwrap();
    let query = write(
        dir.path(),
        "query.json",
        &json!({"visualTags": [{"label": "Husky", "probability": 0.9}]}),
    );
    let sighting = write(dir.path(), "sighting.json", &json!({"id": "s1", "breed": "Pomeranian"}));

    let output = cmd(dir.path())
        .args(["-f", "json", "score", "--explain", "-q"])
        .arg(&query)
        .arg("-s")
        .arg(&sighting)
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output.stdout);
    assert_eq!(body["id"], "s1");
    assert!((body["relevance"].as_f64().unwrap() - 0.6885).abs() < 1e-9);
    assert_eq!(body["breakdown"]["mode"], "visual");
    assert_eq!(body["breakdown"]["penalty"], 0.0);
}

#[test]
fn test_score_text_shows_penalty() {
    let dir = TempDir::new().unwrap();
    let query = write(
        dir.path(),
        "query.json",
        &json!({"visualTags": [{"label": "Husky", "probability": 0.9}]}),
    );
    let sighting = write(dir.path(), "sighting.json", &json!({"breed": "Chihuahua"}));

    cmd(dir.path())
        .args(["score", "--explain", "-q"])
        .arg(&query)
        .arg("-s")
        .arg(&sighting)
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0000"))
        .stdout(predicate::str::contains("penalty"));
}

#[test]
fn test_rank_by_relevance() {
    let dir = TempDir::new().unwrap();
    let query = write(
        dir.path(),
        "query.json",
        &json!({"location": {"latitude": 19.4320, "longitude": -99.1330}}),
    );
    let sightings = write(dir.path(), "sightings.json", &sightings());

    let output = cmd(dir.path())
        .args(["-f", "json", "rank", "-q"])
        .arg(&query)
        .arg("-s")
        .arg(&sightings)
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output.stdout);
    assert_eq!(body["order"], "relevance");
    assert_eq!(body["total"], 2);
    assert_eq!(body["results"][0]["record"]["id"], "near-husky");
    assert_eq!(body["results"][1]["record"]["id"], "far-pug");
    assert_eq!(body["results"][1]["relevance"], 0.0);
}

#[test]
fn test_rank_without_criteria_is_newest_first() {
    let dir = TempDir::new().unwrap();
    let query = write(dir.path(), "query.json", &json!({}));
    let sightings = write(dir.path(), "sightings.json", &sightings());

    let output = cmd(dir.path())
        .args(["-f", "json", "rank", "--limit", "1", "-q"])
        .arg(&query)
        .arg("-s")
        .arg(&sightings)
        .output()
        .unwrap();

    let body = stdout_json(&output.stdout);
    assert_eq!(body["order"], "recency");
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["record"]["id"], "far-pug");
}

#[test]
fn test_alert_writes_notified_ids_once() {
    let dir = TempDir::new().unwrap();
    let profile = write(
        dir.path(),
        "profile.json",
        &json!({"breed": "Husky", "location": {"latitude": 19.4320, "longitude": -99.1330}}),
    );
    let sightings = write(dir.path(), "sightings.json", &sightings());
    let notified = dir.path().join("notified.json");

    let run = || {
        cmd(dir.path())
            .args(["-f", "json", "alert", "--write", "-p"])
            .arg(&profile)
            .arg("-s")
            .arg(&sightings)
            .arg("-n")
            .arg(&notified)
            .output()
            .unwrap()
    };

    let first = stdout_json(&run().stdout);
    assert_eq!(first["decision"]["decision"], "notify");
    assert_eq!(first["toNotify"]["id"], "near-husky");

    let stored: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&notified).unwrap()).unwrap();
    assert_eq!(stored, ["near-husky"]);

    let second = stdout_json(&run().stdout);
    assert_eq!(second["decision"]["decision"], "already_notified");
    assert_eq!(second["toNotify"], Value::Null);
}

#[test]
fn test_alert_write_requires_notified() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["alert", "--write", "-p", "profile.json", "-s", "sightings.json"])
        .assert()
        .failure();
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["score", "-q", "nope.json", "-s", "nope.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn test_malformed_input_is_input_error() {
    let dir = TempDir::new().unwrap();
    let query = dir.path().join("query.json");
    std::fs::write(&query, "{not json").unwrap();

    cmd(dir.path())
        .args(["score", "-q"])
        .arg(&query)
        .args(["-s", "-"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E4002"));
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".dogfinder.toml"), "[alerts]\nnotified_capacity = 0\n").unwrap();

    cmd(dir.path())
        .args(["similar", "pug", "pug"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("alerts.notified_capacity"));
}

#[test]
fn test_config_threshold_changes_alert() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("strict.toml");
    std::fs::write(&config, "[alerts]\nthreshold = 0.9\n").unwrap();
    let profile = write(
        dir.path(),
        "profile.json",
        &json!({"breed": "Husky", "location": {"latitude": 19.4320, "longitude": -99.1330}}),
    );
    let sightings = write(dir.path(), "sightings.json", &sightings());

    let output = cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["-f", "json", "alert", "-p"])
        .arg(&profile)
        .arg("-s")
        .arg(&sightings)
        .output()
        .unwrap();

    let body = stdout_json(&output.stdout);
    assert_eq!(body["decision"]["decision"], "below_threshold");
}

#[test]
fn test_metrics_flag() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["--metrics", "similar", "pug", "carlino"])
        .assert()
        .success()
        .stderr(predicate::str::contains("session_id"));
}
