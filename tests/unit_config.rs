//! Unit tests for graph configuration files

use std::io::Write;

use msocheck::config::{load_config, parse_config, ConfigError, StandardGraph};
use msocheck::graph::{GraphError, Vertex};
use tempfile::NamedTempFile;

#[test]
fn test_explicit_graph() {
    let config = parse_config(
        r#"
        vertices = ["a", "b", "c"]
        edges = [["a", "b"], ["b", "c"]]
        "#,
    )
    .unwrap();
    let graph = config.graph.build().unwrap();
    assert_eq!(graph.vertex_count(), 3);
    assert!(graph.has_edge(&Vertex::new("c"), &Vertex::new("b")));
    assert!(config.report.color);
}

#[test]
fn test_standard_graph() {
    let config = parse_config(
        r#"
        [standard]
        kind = "complete-bipartite"
        m = 2
        n = 3

        [report]
        color = false
        "#,
    )
    .unwrap();
    assert_eq!(
        config.graph.standard,
        Some(StandardGraph::CompleteBipartite { m: 2, n: 3 })
    );
    assert!(!config.report.color);
    assert_eq!(config.graph.build().unwrap().edge_count(), 6);
}

#[test]
fn test_standard_graph_extended_by_lists() {
    let config = parse_config(
        r#"
        vertices = ["x"]
        edges = [["1", "x"]]

        [standard]
        kind = "cycle"
        n = 3
        "#,
    )
    .unwrap();
    let graph = config.graph.build().unwrap();
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_empty_config_is_empty_graph() {
    let config = parse_config("").unwrap();
    assert!(config.graph.build().unwrap().is_empty());
}

#[test]
fn test_invalid_toml() {
    assert!(matches!(parse_config("vertices = ["), Err(ConfigError::Parse { .. })));
    assert!(matches!(
        parse_config("[standard]\nkind = \"hypercube\"\nn = 3"),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_invalid_graph() {
    let config = parse_config(r#"vertices = ["a"]
edges = [["a", "a"]]"#).unwrap();
    assert!(matches!(
        config.graph.build(),
        Err(ConfigError::Graph(GraphError::SelfLoop(_)))
    ));

    let config = parse_config("[standard]\nkind = \"cycle\"\nn = 2").unwrap();
    assert!(matches!(
        config.graph.build(),
        Err(ConfigError::Graph(GraphError::InvalidSize(_)))
    ));
}

#[test]
fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[standard]\nkind = \"path\"\nn = 4").unwrap();
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.graph.build().unwrap().edge_count(), 3);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(matches!(load_config(&missing), Err(ConfigError::Read { .. })));
}
