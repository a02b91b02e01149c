use crate::error::Result;
use crate::graph::Graph;
use crate::node::GraphNode;
use crate::persist::ensure_fresh_path;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use wikigraph_crawler::CanonicalUrl;

/// Output contracts fed from the node table. The formats themselves belong
/// to external tooling; the graph only has to produce them faithfully.
impl Graph {
    /// Adjacency-list rendering: one line per node in table order, the
    /// node's URL followed by every URL it references.
    pub fn to_adjacency_list(&self) -> String {
        let mut out = format!("# adjacency list for {}\n", self.root_url());
        for node in self.nodes() {
            out.push_str(node.url().as_str());
            for target in node.outgoing() {
                out.push(' ');
                out.push_str(target.as_str());
            }
            out.push('\n');
        }
        out
    }

    pub fn write_adjacency_list(&self, path: &Path) -> Result<()> {
        ensure_fresh_path(path)?;
        fs::write(path, self.to_adjacency_list())?;
        Ok(())
    }

    /// GML rendering: one node per visited URL with `label` and `title`
    /// attributes, one edge per recorded reference. Entries of `markup`
    /// are embedded as an additional `markup` attribute.
    pub fn to_gml(&self, markup: &BTreeMap<CanonicalUrl, String>) -> String {
        let export = self.to_petgraph();

        let mut out = String::from("graph [\n  directed 1\n");
        for index in export.node_indices() {
            let node = export[index];
            out.push_str("  node [\n");
            let _ = writeln!(out, "    id {}", index.index());
            let _ = writeln!(out, "    label \"{}\"", gml_escape(node.url().as_str()));
            let _ = writeln!(out, "    title \"{}\"", gml_escape(&node.label()));
            if let Some(html) = markup.get(node.url()) {
                let _ = writeln!(out, "    markup \"{}\"", gml_escape(html));
            }
            out.push_str("  ]\n");
        }
        for edge in export.edge_references() {
            out.push_str("  edge [\n");
            let _ = writeln!(out, "    source {}", edge.source().index());
            let _ = writeln!(out, "    target {}", edge.target().index());
            out.push_str("  ]\n");
        }
        out.push_str("]\n");
        out
    }

    pub fn write_gml(&self, path: &Path, markup: &BTreeMap<CanonicalUrl, String>) -> Result<()> {
        ensure_fresh_path(path)?;
        fs::write(path, self.to_gml(markup))?;
        Ok(())
    }

    /// Loads the node table into an integer-indexed petgraph, which supplies
    /// the stable node ids the GML format needs.
    fn to_petgraph(&self) -> DiGraph<&GraphNode, ()> {
        let mut export = DiGraph::new();
        let mut indices = BTreeMap::new();
        for node in self.nodes() {
            indices.insert(node.url(), export.add_node(node));
        }
        for node in self.nodes() {
            for target in node.outgoing() {
                if let (Some(&source), Some(&target)) =
                    (indices.get(node.url()), indices.get(target))
                {
                    export.add_edge(source, target, ());
                }
            }
        }
        export
    }
}

/// GML strings are double-quoted; quotes and ampersands become entities,
/// line breaks are flattened.
fn gml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace(['\n', '\r'], " ")
}
