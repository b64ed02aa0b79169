use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GAME_LOG: &str = r#"{
    "FROM_Dog_TO_Moon": [
        {"player_name": "ada", "path_concept": ["Dog", "Cat", "Moon"], "won": true, "time": 30, "points": 10},
        {"player_name": "bob", "path_concept": ["Dog", "Wolf"], "won": false, "time": 50, "points": 0}
    ],
    "FROM_Cat_TO_Sun": [
        {"player_name": "cy", "path_concept": ["Cat", "Dog"], "won": false, "time": 12, "points": 0}
    ]
}"#;

const GRAPH: &str = r#"{
    "Dog": {"links": ["Cat", "Wolf"]},
    "Cat": {"links": ["Dog", "Moon"]},
    "Wolf": {"links": ["Dog"]},
    "Moon": {"links": []}
}"#;

fn wikinav(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wikinav").unwrap();
    cmd.arg("--config").arg(dir.path().join("config.toml"));
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("wikinav")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dataset"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_dataset_pipeline() {
    let dir = TempDir::new().unwrap();
    let log = write(&dir, "complete.json", GAME_LOG);
    let stats = dir.path().join("stats.json");
    let benchmark = dir.path().join("benchmark.json");

    wikinav(&dir)
        .args(["dataset", "stats"])
        .arg(&log)
        .arg("-o")
        .arg(&stats)
        .assert()
        .success();

    let report = read_json(&stats);
    assert_eq!(report["matches"].as_array().unwrap().len(), 3);
    assert_eq!(report["statistics"][0]["from_node"], "Dog");
    assert_eq!(report["statistics"][0]["win_percentage"], 50.0);
    assert_eq!(report["statistics"][1]["avg_steps_to_win"], serde_json::Value::Null);

    wikinav(&dir)
        .args(["dataset", "classify"])
        .arg(&stats)
        .arg("-o")
        .arg(&benchmark)
        .assert()
        .success();

    let tiers = read_json(&benchmark);
    assert_eq!(tiers["MEDIUM"][0]["start_node"], "Dog");
    assert_eq!(tiers["HARD"].as_array().unwrap().len(), 0);
    assert_eq!(tiers["VERY_HARD"].as_array().unwrap().len(), 0);
    assert_eq!(tiers["IMPOSSIBLE"][0]["end_node"], "Sun");
}

#[test]
fn test_dataset_stats_table() {
    let dir = TempDir::new().unwrap();
    let log = write(&dir, "complete.json", GAME_LOG);

    wikinav(&dir)
        .args(["dataset", "stats"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("win_percentage"))
        .stdout(predicate::str::contains("Moon"));
}

#[test]
fn test_validate_against_fixture() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "graph.json", GRAPH);

    wikinav(&dir)
        .args(["validate", "Dog", "Cat", "Moon", "--end", "Moon", "--fixture"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("No errors"))
        .stdout(predicate::str::contains("Complete: true"));

    wikinav(&dir)
        .args(["-f", "json", "validate", "Dog", "Moon", "Cat", "--fixture"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("NO LINK: Dog -> Moon"))
        .stdout(predicate::str::contains("NO PAGE: Moon"));

    wikinav(&dir)
        .args(["validate", "Dog", "--end", "Dog", "--fixture"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("No errors"))
        .stdout(predicate::str::contains("Complete: true"));
}

#[test]
fn test_graph_links_from_fixture() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "graph.json", GRAPH);

    wikinav(&dir)
        .args(["-f", "csv", "graph", "--fixture"])
        .arg(&graph)
        .args(["visible", "Dog", "--exclude", "Wolf"])
        .assert()
        .success()
        .stdout("value\nCat\n");

    wikinav(&dir)
        .args(["graph", "--fixture"])
        .arg(&graph)
        .args(["links", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such article"));

    wikinav(&dir)
        .args(["graph", "--fixture"])
        .arg(&graph)
        .args(["visible", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such article: Atlantis"));
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();

    wikinav(&dir).args(["config", "init"]).assert().success();
    wikinav(&dir).args(["config", "init"]).assert().failure();

    wikinav(&dir)
        .args(["config", "set", "eval.max_steps", "7"])
        .assert()
        .success();
    wikinav(&dir)
        .args(["config", "get", "eval.max_steps"])
        .assert()
        .success()
        .stdout("7\n");
    wikinav(&dir)
        .args(["config", "get", "eval.nonsense"])
        .assert()
        .failure();
}

#[test]
fn test_run_records_unreachable_model() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "graph.json", GRAPH);
    let benchmark = write(
        &dir,
        "benchmark.json",
        r#"{"MEDIUM": [{"start_node": "Dog", "end_node": "Moon", "avg_human_step_to_win": 3.0,
            "list_path_user_with_result": [["Dog -> Cat -> Moon", true]]}],
            "HARD": [], "VERY_HARD": [], "IMPOSSIBLE": []}"#,
    );
    write(
        &dir,
        "config.toml",
        r#"
[retry]
max_attempts = 1

[eval]
contexts = ["no_think"]

[[models]]
provider = "endpoint"
name = "offline"
url = "http://127.0.0.1:9/ask"
"#,
    );
    let results = dir.path().join("results.json");

    wikinav(&dir)
        .arg("run")
        .arg(&benchmark)
        .arg("--fixture")
        .arg(&graph)
        .arg("-o")
        .arg(&results)
        .assert()
        .success();

    let rows = read_json(&results);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["game_mode"], "MEDIUM");
    assert_eq!(rows[0]["type_context"], "NO_THINK");
    assert_eq!(rows[0]["errors"][0], "NO CORRECT PATH");
    assert_eq!(rows[0]["human_paths"], "Dog -> Cat -> Moon @#@\n");
}

#[test]
fn test_run_without_models_fails() {
    let dir = TempDir::new().unwrap();
    let benchmark = write(&dir, "benchmark.json", r#"{"MEDIUM": []}"#);

    wikinav(&dir)
        .arg("run")
        .arg(&benchmark)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No models configured"));
}
