//! Integration test for import, persistence and traversal
//!
//! This test uses the pre-created fixture at `tests/test-fixtures/municipios.csv`
//! to verify a full session: import, persist, reopen and traverse.

use road_graph_core::import::SkipReason;
use road_graph_core::{render, Session, SqliteStore, Traversal};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_integration_import_persist_traverse() {
    let fixture_path = Path::new("tests/test-fixtures/municipios.csv");
    assert!(fixture_path.exists(), "Fixture file should exist");

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("roads.db");

    let report = {
        let mut session = Session::open(SqliteStore::open(&db_path).unwrap()).unwrap();
        session.import_path(fixture_path).unwrap()
    };

    // Two malformed rows: a spelled-out distance and a missing field
    assert_eq!(report.applied.len(), 7);
    assert_eq!(report.skipped.len(), 2);
    assert!(matches!(report.skipped[0].reason, SkipReason::InvalidDistance(_)));
    assert!(matches!(report.skipped[1].reason, SkipReason::FieldCount(2)));

    // A fresh session sees exactly what was imported
    let session = Session::open(SqliteStore::open(&db_path).unwrap()).unwrap();
    let graph = session.graph();
    assert_eq!(graph.node_count(), 9);
    assert!(!graph.contains("Chinautla"), "Skipped rows must not register nodes");

    let bfs = session.traverse(Traversal::BreadthFirst, "Guatemala").unwrap();
    assert_eq!(
        bfs,
        vec![
            "Guatemala",
            "Mixco",
            "Villa Nueva",
            "San Lucas Sacatepéquez",
            "Amatitlán",
            "Antigua Guatemala",
            "Chimaltenango",
        ]
    );

    let dfs = session.traverse(Traversal::DepthFirst, "Guatemala").unwrap();
    assert_eq!(
        dfs,
        vec![
            "Guatemala",
            "Mixco",
            "San Lucas Sacatepéquez",
            "Antigua Guatemala",
            "Chimaltenango",
            "Villa Nueva",
            "Amatitlán",
        ]
    );

    // Same reachable set, each node once
    let mut bfs_sorted = bfs.clone();
    let mut dfs_sorted = dfs.clone();
    bfs_sorted.sort();
    dfs_sorted.sort();
    assert_eq!(bfs_sorted, dfs_sorted);
    bfs_sorted.dedup();
    assert_eq!(bfs_sorted.len(), bfs.len());

    // The other component stays separate
    assert_eq!(
        session.traverse(Traversal::BreadthFirst, "San Benito").unwrap(),
        vec!["San Benito", "Flores"]
    );

    let dot = render::render_dot(graph, Some(dfs.as_slice()));
    assert!(dot.contains("Chimaltenango"));
}
