// Adjacency-list and GML export contracts.

use std::collections::BTreeMap;
use std::fs;
use wikigraph_core::{Graph, GraphError, GraphNode};
use wikigraph_crawler::{Article, CanonicalUrl};

fn url(path: &str) -> CanonicalUrl {
    CanonicalUrl::parse(&format!("https://de.wikipedia.org/wiki/{path}")).unwrap()
}

fn sample_graph() -> Graph {
    let mut graph = Graph::new(Article::new(url("Kaffee")), 500, 10);
    graph.insert(GraphNode::new(Article::new(url("Tee")), 1));
    graph.insert(GraphNode::new(Article::new(url("Milch")), 1));
    graph.add_edge(&url("Kaffee"), &url("Tee"));
    graph.add_edge(&url("Kaffee"), &url("Milch"));
    graph
}

#[test]
fn test_adjacency_list_one_line_per_node() {
    let listing = sample_graph().to_adjacency_list();
    let lines: Vec<&str> = listing.lines().collect();

    assert!(lines[0].starts_with('#'));
    assert_eq!(lines.len(), 4);
    // Table order is key order, and reference sets are sorted too.
    assert_eq!(
        lines[1],
        "https://de.wikipedia.org/wiki/Kaffee \
         https://de.wikipedia.org/wiki/Milch \
         https://de.wikipedia.org/wiki/Tee"
    );
    assert_eq!(lines[2], "https://de.wikipedia.org/wiki/Milch");
    assert_eq!(lines[3], "https://de.wikipedia.org/wiki/Tee");
}

#[test]
fn test_gml_structure() {
    let gml = sample_graph().to_gml(&BTreeMap::new());

    assert!(gml.starts_with("graph [\n  directed 1\n"));
    assert_eq!(gml.matches("  node [").count(), 3);
    assert_eq!(gml.matches("  edge [").count(), 2);
    assert!(gml.contains(r#"label "https://de.wikipedia.org/wiki/Kaffee""#));
    // No title was ever fetched, so the URL-derived label stands in.
    assert!(gml.contains(r#"title "Kaffee""#));
    assert!(gml.ends_with("]\n"));
}

#[test]
fn test_gml_embeds_markup_where_present() {
    let graph = sample_graph();
    let mut markup = BTreeMap::new();
    markup.insert(
        url("Kaffee"),
        "<html>\"Kaffee\" &amp; mehr\n</html>".to_string(),
    );

    let gml = graph.to_gml(&markup);

    assert_eq!(gml.matches("markup \"").count(), 1);
    assert!(gml.contains(r#"markup "<html>&quot;Kaffee&quot; &amp;amp; mehr </html>""#));
}

#[test]
fn test_exports_refuse_occupied_paths() {
    let dir = tempfile::tempdir().unwrap();
    let graph = sample_graph();

    let adj_path = dir.path().join("graph.adj");
    fs::write(&adj_path, "taken").unwrap();
    assert!(matches!(
        graph.write_adjacency_list(&adj_path),
        Err(GraphError::DestinationExists(_))
    ));

    let gml_path = dir.path().join("graph.gml");
    fs::write(&gml_path, "taken").unwrap();
    assert!(matches!(
        graph.write_gml(&gml_path, &BTreeMap::new()),
        Err(GraphError::DestinationExists(_))
    ));
}

#[test]
fn test_export_files_written() {
    let dir = tempfile::tempdir().unwrap();
    let graph = sample_graph();

    let adj_path = dir.path().join("graph.adj");
    graph.write_adjacency_list(&adj_path).unwrap();
    assert_eq!(fs::read_to_string(&adj_path).unwrap(), graph.to_adjacency_list());

    let gml_path = dir.path().join("graph.gml");
    graph.write_gml(&gml_path, &BTreeMap::new()).unwrap();
    assert_eq!(
        fs::read_to_string(&gml_path).unwrap(),
        graph.to_gml(&BTreeMap::new())
    );
}
