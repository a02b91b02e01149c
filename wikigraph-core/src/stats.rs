use crate::graph::Graph;
use crate::node::GraphNode;

/// Derived queries over a graph. Computed on demand; the graph only mutates
/// while a crawl is expanding, so there is nothing worth caching.
impl Graph {
    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes().map(GraphNode::out_degree).sum()
    }

    /// The node with the most outgoing references.
    pub fn node_with_max_out_degree(&self) -> Option<&GraphNode> {
        self.nodes().max_by_key(|node| node.out_degree())
    }

    /// The node with the most incoming references.
    pub fn node_with_max_in_degree(&self) -> Option<&GraphNode> {
        self.nodes().max_by_key(|node| node.in_degree())
    }

    /// How close the graph is to carrying every edge its node count allows:
    /// `edges / (n * (n - 1))`. Undefined below two nodes.
    pub fn density(&self) -> Option<f64> {
        let n = self.node_count();
        if n < 2 {
            return None;
        }
        Some(self.edge_count() as f64 / (n * (n - 1)) as f64)
    }
}
