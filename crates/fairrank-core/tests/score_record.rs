//! Round-trip tests for the tab-separated score record.

use fairrank_core::graph::{Directedness, MemoryGraph};
use fairrank_core::record::{
    HEADER, load_score_results, record_file_name, save_score_results,
};
use fairrank_core::{Algorithm, AttributeTable, ClassValue, NodeId, ScoreMap, compute_scores};
use tempfile::TempDir;

#[test]
fn saved_record_reloads_scores_and_classes() {
    let dir = TempDir::new().expect("temp dir");

    let scores = ScoreMap::from_entries([
        (NodeId(0), 1234.567_891),
        (NodeId(1), 0.000_123_4),
        (NodeId(2), 0.0),
        (NodeId(3), 42.0),
    ])
    .rank();
    let attrs: AttributeTable = [
        (NodeId(0), ClassValue(1)),
        (NodeId(1), ClassValue::UNKNOWN),
        (NodeId(2), ClassValue(3)),
        (NodeId(3), ClassValue(2)),
    ]
    .into_iter()
    .collect();

    let path = save_score_results(dir.path(), "toy", Algorithm::Pagerank, &scores, &attrs, None)
        .expect("save");
    assert_eq!(path, dir.path().join("toy_pagerank_scores.txt"));

    let loaded = load_score_results(&path).expect("load");
    assert_eq!(loaded.scores.len(), 4);

    for ((node, expected), (score, class)) in scores
        .iter()
        .zip(loaded.scores.iter().zip(loaded.classes.iter()))
    {
        assert!((expected - score).abs() < 1e-6, "{node}: {expected} vs {score}");
        let expected_class = attrs.get(node).expect("classified");
        assert!((f64::from(expected_class.0) - class).abs() < 1e-6);
    }

    // File order is the ranked order.
    assert!(loaded.scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(loaded.classes.contains(&-1.0));
}

#[test]
fn labelled_record_from_computed_scores() {
    let dir = TempDir::new().expect("temp dir");
    let (graph, labels) = MemoryGraph::from_edge_list(
        "alice bob\nbob carol\ncarol dave\n".as_bytes(),
        Directedness::Undirected,
    )
    .expect("edges");
    let attrs: AttributeTable = ["alice", "bob", "carol", "dave"]
        .iter()
        .zip([1, 2, 1, 2])
        .map(|(label, class)| (labels.id(label).expect("known"), ClassValue(class)))
        .collect();

    let scores = compute_scores(&graph, Algorithm::Centrality, true).expect("scores");
    let path = save_score_results(
        dir.path(),
        "chain",
        Algorithm::Centrality,
        &scores,
        &attrs,
        Some(&labels),
    )
    .expect("save");

    let text = std::fs::read_to_string(&path).expect("read back");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER));
    let first_labels: Vec<&str> = lines
        .map(|l| l.split('\t').next().unwrap_or_default())
        .collect();
    assert_eq!(first_labels.len(), 4);
    for label in ["alice", "bob", "carol", "dave"] {
        assert!(first_labels.contains(&label));
    }

    let loaded = load_score_results(&path).expect("load");
    assert_eq!(loaded.scores, scores.values());
}

#[test]
fn file_name_combines_network_and_algorithm() {
    assert_eq!(
        record_file_name("facebook", Algorithm::Eccentricity),
        "facebook_eccentricity_scores.txt"
    );
}
