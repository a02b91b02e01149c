use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use wikigraph_core::persist::ensure_fresh_path;
use wikigraph_core::{Graph, GraphError, GraphNode};
use wikigraph_crawler::CanonicalUrl;

pub const NODE_COLOR: &str = "#97c2fc";
pub const HIGHLIGHT_COLOR: &str = "#fb7e81";

#[derive(Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: String,
    color: &'static str,
}

#[derive(Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
    arrows: &'static str,
}

/// Rendering options exported from the configurable vis-network view.
const VIS_OPTIONS: &str = r#"{
  "edges": {
    "color": {
      "inherit": true
    },
    "smooth": false
  },
  "layout": {
    "hierarchical": {
      "enabled": true
    }
  },
  "interaction": {
    "hideEdgesOnDrag": true
  },
  "physics": {
    "hierarchicalRepulsion": {
      "centralGravity": 0
    },
    "minVelocity": 0.75,
    "solver": "hierarchicalRepulsion"
  }
}"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>__TITLE__</title>
  <script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
  <style>
    #graph {
      width: 100%;
      height: 100vh;
      border: 1px solid #ddd;
    }
  </style>
</head>
<body>
  <div id="graph"></div>
  <script>
    var nodes = new vis.DataSet(__NODES__);
    var edges = new vis.DataSet(__EDGES__);
    var container = document.getElementById("graph");
    var options = __OPTIONS__;
    new vis.Network(container, { nodes: nodes, edges: edges }, options);
  </script>
</body>
</html>
"#;

/// Writes a self-contained interactive view of the graph into `dir` and
/// returns the file path. The render engine itself is vis-network, loaded
/// by the generated page; this only feeds it nodes and edges.
///
/// Nodes whose label contains `search` (or whose entry in `markup` does)
/// are highlighted.
pub fn write_visualization(
    graph: &Graph,
    search: Option<&str>,
    markup: &BTreeMap<CanonicalUrl, String>,
    dir: &Path,
) -> Result<PathBuf, GraphError> {
    let filename = format!(
        "{}_graph.html",
        graph.root().label().replace(' ', "_").replace('/', "-")
    );
    let path = dir.join(filename);
    ensure_fresh_path(&path)?;

    let matches_search = |node: &GraphNode| -> bool {
        let Some(term) = search else { return false };
        let term = term.to_lowercase();
        node.label().to_lowercase().contains(&term)
            || markup
                .get(node.url())
                .is_some_and(|html| html.to_lowercase().contains(&term))
    };

    let nodes: Vec<VisNode> = graph
        .nodes()
        .map(|node| VisNode {
            id: node.url().as_str(),
            label: node.label(),
            color: if matches_search(node) {
                HIGHLIGHT_COLOR
            } else {
                NODE_COLOR
            },
        })
        .collect();
    let edges: Vec<VisEdge> = graph
        .nodes()
        .flat_map(|node| {
            node.outgoing().iter().map(move |target| VisEdge {
                from: node.url().as_str(),
                to: target.as_str(),
                arrows: "to",
            })
        })
        .collect();

    let nodes_json =
        serde_json::to_string(&nodes).map_err(|e| GraphError::Encode(e.to_string()))?;
    let edges_json =
        serde_json::to_string(&edges).map_err(|e| GraphError::Encode(e.to_string()))?;

    let page = PAGE_TEMPLATE
        .replace("__TITLE__", &graph.root().label())
        .replace("__NODES__", &nodes_json)
        .replace("__EDGES__", &edges_json)
        .replace("__OPTIONS__", VIS_OPTIONS);
    fs::write(&path, page)?;
    Ok(path)
}
