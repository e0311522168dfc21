//! E2E tests for the graph commands:
//! `fairrank scores`, `homophily`, `top-k`, `gini`, `classes`.
//!
//! Every test runs against the same small network:
//!
//! ```text
//!   A — B        A:1 B:1 C:2 D:2 E:unknown
//!   |
//!   C — D — E
//! ```
//!
//! E is pruned unless `--keep-unknown` is passed, leaving the path
//! B — A — C — D.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

const EDGES: &str = "# toy network\nA B\nC D\nA C\nD E\n";
const FEATURES: &str = "A 1 0 0\nB 1 0 0\nC 0 1 0\nD 0 1 0\nE 0 0 0\n";

fn fairrank_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fairrank"));
    cmd.current_dir(dir);
    cmd.env("FAIRRANK_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn network() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("toy.edges"), EDGES).expect("write edges");
    std::fs::write(dir.path().join("toy.feat"), FEATURES).expect("write features");
    dir
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = fairrank_cmd(dir)
        .args(args)
        .args(["--edges", "toy.edges", "--features", "toy.feat", "--json"])
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "fairrank {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

fn as_f64(value: &Value) -> f64 {
    value.as_f64().expect("number")
}

// ---------------------------------------------------------------------------
// homophily
// ---------------------------------------------------------------------------

#[test]
fn homophily_json_reports_both_classes() {
    let dir = network();

    for class in ["1", "2"] {
        let report = run_json(dir.path(), &["homophily", "--class", class]);
        assert!((as_f64(&report["homophily"]) - 0.75).abs() < 1e-12);
        assert_eq!(report["members"], 2);
        assert_eq!(report["directedness"], "undirected");
    }
}

#[test]
fn homophily_text_output_is_tab_separated() {
    let dir = network();
    fairrank_cmd(dir.path())
        .args([
            "homophily", "--class", "1", "--edges", "toy.edges", "--features", "toy.feat",
            "--format", "text",
        ])
        .assert()
        .success()
        .stdout("1\t0.75\n");
}

#[test]
fn homophily_of_absent_class_fails_with_code() {
    let dir = network();
    fairrank_cmd(dir.path())
        .args([
            "homophily", "--class", "3", "--edges", "toy.edges", "--features", "toy.feat",
            "--json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty_class"));
}

#[test]
fn config_file_switches_to_directed_edges() {
    let dir = network();
    std::fs::write(dir.path().join("fairrank.toml"), "[graph]\ndirected = true\n")
        .expect("write config");

    // A → {B, C} = 0.5; B has no out-edges and dilutes the mean.
    let report = run_json(dir.path(), &["homophily", "--class", "1"]);
    assert_eq!(report["directedness"], "directed");
    assert!((as_f64(&report["homophily"]) - 0.25).abs() < 1e-12);
}

#[test]
fn malformed_config_is_reported() {
    let dir = network();
    std::fs::write(dir.path().join("fairrank.toml"), "[graph\n").expect("write config");

    fairrank_cmd(dir.path())
        .args(["classes", "--edges", "toy.edges", "--features", "toy.feat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

// ---------------------------------------------------------------------------
// classes
// ---------------------------------------------------------------------------

#[test]
fn classes_prunes_unknown_nodes_by_default() {
    let dir = network();
    let report = run_json(dir.path(), &["classes", "--num-classes", "3"]);

    assert_eq!(report["total"], 4);
    assert_eq!(report["pruned"], 1);
    let counts: Vec<(i64, i64)> = report["classes"]
        .as_array()
        .expect("classes array")
        .iter()
        .map(|c| (c["class"].as_i64().expect("class"), c["nodes"].as_i64().expect("nodes")))
        .collect();
    assert_eq!(counts, vec![(1, 2), (2, 2), (3, 0)]);
}

#[test]
fn keep_unknown_retains_unclassified_nodes() {
    let dir = network();
    let report = run_json(dir.path(), &["classes", "--keep-unknown"]);

    assert_eq!(report["total"], 5);
    assert_eq!(report["pruned"], 0);
    assert_eq!(report["classes"][0]["class"], -1);
    assert_eq!(report["classes"][0]["nodes"], 1);
}

// ---------------------------------------------------------------------------
// scores
// ---------------------------------------------------------------------------

#[test]
fn sorted_pagerank_scores_are_descending_and_sum_to_one() {
    let dir = network();
    let report = run_json(dir.path(), &["scores", "--sorted"]);

    assert_eq!(report["algorithm"], "pagerank");
    assert_eq!(report["sorted"], true);
    assert_eq!(report["nodes"], 4);

    let scores: Vec<f64> = report["scores"]
        .as_array()
        .expect("scores array")
        .iter()
        .map(|row| as_f64(&row["score"]))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-3);
}

#[test]
fn eccentricity_ranks_path_centre_first() {
    let dir = network();
    let report = run_json(dir.path(), &["scores", "-a", "eccentricity", "--sorted"]);

    let top: Vec<&str> = report["scores"]
        .as_array()
        .expect("scores array")
        .iter()
        .take(2)
        .map(|row| row["node"].as_str().expect("label"))
        .collect();
    assert_eq!(top, vec!["A", "C"]);
    assert!((as_f64(&report["scores"][0]["score"]) - 0.5).abs() < 1e-12);
}

#[test]
fn unknown_algorithm_is_rejected_by_parser() {
    let dir = network();
    fairrank_cmd(dir.path())
        .args([
            "scores", "-a", "katz", "--edges", "toy.edges", "--features", "toy.feat",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("katz"));
}

#[test]
fn saved_record_feeds_gini() {
    let dir = network();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).expect("out dir");

    let report = run_json(
        dir.path(),
        &["scores", "-a", "eccentricity", "--save-dir", "out", "--network", "toy"],
    );
    let saved = report["saved_to"].as_str().expect("saved path");
    assert!(saved.ends_with("toy_eccentricity_scores.txt"));

    let record = out.join("toy_eccentricity_scores.txt");
    let text = std::fs::read_to_string(&record).expect("record written");
    assert!(text.starts_with("#node_label"));
    assert_eq!(text.lines().count(), 5);

    let output = fairrank_cmd(dir.path())
        .args(["gini", "--record", "out/toy_eccentricity_scores.txt", "--json"])
        .output()
        .expect("gini should not crash");
    assert!(output.status.success());
    let gini: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");

    // Scores {1/3, 1/2, 1/2, 1/3}: G = (8 · 1/6) / (2 · 5/12 · 16) = 0.1.
    assert!((as_f64(&gini["gini"]) - 0.1).abs() < 1e-6);
    assert_eq!(gini["source"]["kind"], "record");
    assert_eq!(gini["values"], 4);
}

// ---------------------------------------------------------------------------
// gini / top-k
// ---------------------------------------------------------------------------

#[test]
fn computed_gini_matches_record_gini() {
    let dir = network();
    let report = run_json(dir.path(), &["gini", "-a", "eccentricity"]);
    assert_eq!(report["source"]["kind"], "computed");
    assert_eq!(report["source"]["algorithm"], "eccentricity");
    assert!((as_f64(&report["gini"]) - 0.1).abs() < 1e-12);
}

#[test]
fn gini_requires_graph_or_record() {
    let dir = network();
    fairrank_cmd(dir.path())
        .args(["gini"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--edges"));
}

#[test]
fn top_half_by_eccentricity() {
    let dir = network();
    let report = run_json(
        dir.path(),
        &["top-k", "--k", "50", "--class", "1", "-a", "eccentricity"],
    );
    assert_eq!(report["window"], 2);
    assert_eq!(report["nodes"], 4);
    assert!((as_f64(&report["rate"]) - 0.5).abs() < 1e-12);
}

#[test]
fn top_k_full_window_is_population_share() {
    let dir = network();
    for algorithm in ["pagerank", "eccentricity", "centrality"] {
        let report = run_json(
            dir.path(),
            &["top-k", "--k", "100", "--class", "2", "-a", algorithm],
        );
        assert!((as_f64(&report["rate"]) - 0.5).abs() < 1e-12, "{algorithm}");
    }
}

#[test]
fn top_k_out_of_range_fails() {
    let dir = network();
    for k in ["150", "-5"] {
        fairrank_cmd(dir.path())
            .args([
                "top-k", "--k", k, "--class", "1", "--edges", "toy.edges", "--features",
                "toy.feat", "--json",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid_k"));
    }
}

#[test]
fn top_k_rejects_k_before_reading_input() {
    let dir = TempDir::new().expect("temp dir");
    // Neither file exists: a load attempt would fail with a different error.
    fairrank_cmd(dir.path())
        .args([
            "top-k", "--k", "150", "--class", "1", "-a", "centrality", "--edges", "missing.edges",
            "--features", "missing.feat", "--json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_k"))
        .stderr(predicate::str::contains("failed to open").not());
}

#[test]
fn gini_record_rejects_graph_only_flags() {
    let dir = network();
    for flag in ["--directed", "--keep-unknown"] {
        fairrank_cmd(dir.path())
            .args(["gini", "--record", "scores.txt", flag])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be used with"));
    }
}
