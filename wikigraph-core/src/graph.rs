use crate::node::GraphNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use wikigraph_crawler::{Article, CanonicalUrl};

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_MAX_NODES: usize = 500;

/// Directed reference graph around a root article.
///
/// The graph exclusively owns every node, keyed by canonical URL; the table
/// is the single source of identity, so no two entries for relative and
/// absolute variants of one article can coexist. Iteration order is the
/// key order, which keeps frontier snapshots, exports and serialized
/// artifacts deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    nodes: BTreeMap<CanonicalUrl, GraphNode>,
    root: CanonicalUrl,
    max_nodes: usize,
    max_depth: usize,
}

impl Graph {
    /// Creates a graph containing only the root node at depth 0.
    pub fn new(root: Article, max_nodes: usize, max_depth: usize) -> Self {
        let root_node = GraphNode::new(root, 0);
        let root_key = root_node.url().clone();
        let mut nodes = BTreeMap::new();
        nodes.insert(root_key.clone(), root_node);
        Self {
            nodes,
            root: root_key,
            max_nodes,
            max_depth,
        }
    }

    pub fn root(&self) -> &GraphNode {
        self.nodes.get(&self.root).expect("root node present")
    }

    pub fn root_url(&self) -> &CanonicalUrl {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn contains(&self, url: &CanonicalUrl) -> bool {
        self.nodes.contains_key(url)
    }

    pub fn get(&self, url: &CanonicalUrl) -> Option<&GraphNode> {
        self.nodes.get(url)
    }

    /// Nodes in key order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Inserts a newly discovered node. An already-present URL is left
    /// untouched and reported as `false`; the caller decides about edges.
    pub fn insert(&mut self, node: GraphNode) -> bool {
        match self.nodes.entry(node.url().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    /// Records the edge `from -> to` on both endpoints. Unknown endpoints
    /// leave the graph unchanged, never half an edge.
    pub fn add_edge(&mut self, from: &CanonicalUrl, to: &CanonicalUrl) {
        if from == to {
            if let Some(node) = self.nodes.get_mut(from) {
                node.link_self();
            }
            return;
        }
        let Some(mut source) = self.nodes.remove(from) else {
            return;
        };
        if let Some(target) = self.nodes.get_mut(to) {
            source.link_to(target);
        }
        self.nodes.insert(from.clone(), source);
    }

    pub(crate) fn set_title(&mut self, url: &CanonicalUrl, title: String) {
        if let Some(node) = self.nodes.get_mut(url) {
            node.set_title(title);
        }
    }

    pub(crate) fn mark_failed(&mut self, url: &CanonicalUrl) {
        if let Some(node) = self.nodes.get_mut(url) {
            node.mark_failed();
        }
    }

    /// Integrity check run on loaded snapshots: root present at depth 0,
    /// every edge endpoint known, adjacency symmetric, bounds respected.
    pub fn validate(&self) -> Result<(), String> {
        let root = self
            .nodes
            .get(&self.root)
            .ok_or_else(|| format!("root {} missing from node table", self.root))?;
        if root.depth() != 0 {
            return Err(format!("root {} has depth {}", self.root, root.depth()));
        }
        if self.nodes.len() > self.max_nodes {
            return Err(format!(
                "{} nodes exceed the configured maximum of {}",
                self.nodes.len(),
                self.max_nodes
            ));
        }
        for (url, node) in &self.nodes {
            if node.url() != url {
                return Err(format!("node keyed {url} wraps article {}", node.url()));
            }
            if node.depth() > self.max_depth {
                return Err(format!(
                    "{url} at depth {} exceeds the depth bound {}",
                    node.depth(),
                    self.max_depth
                ));
            }
            for target in node.outgoing() {
                match self.nodes.get(target) {
                    Some(other) if other.incoming().contains(url) => {}
                    Some(_) => {
                        return Err(format!("edge {url} -> {target} missing its reverse entry"));
                    }
                    None => {
                        return Err(format!("edge {url} -> {target} points outside the table"));
                    }
                }
            }
            for source in node.incoming() {
                match self.nodes.get(source) {
                    Some(other) if other.outgoing().contains(url) => {}
                    Some(_) => {
                        return Err(format!("edge {source} -> {url} missing its forward entry"));
                    }
                    None => {
                        return Err(format!("edge {source} -> {url} points outside the table"));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> CanonicalUrl {
        CanonicalUrl::parse(&format!("https://de.wikipedia.org/wiki/{path}")).unwrap()
    }

    fn graph() -> Graph {
        Graph::new(Article::new(url("Kaffee")), 500, 10)
    }

    #[test]
    fn test_new_graph_holds_only_the_root_at_depth_zero() {
        let g = graph();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.root().depth(), 0);
        assert_eq!(g.root_url(), &url("Kaffee"));
    }

    #[test]
    fn test_insert_deduplicates_by_url() {
        let mut g = graph();
        assert!(g.insert(GraphNode::new(Article::new(url("Tee")), 1)));
        assert!(!g.insert(GraphNode::new(Article::new(url("Tee")), 2)));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.get(&url("Tee")).unwrap().depth(), 1);
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut g = graph();
        g.insert(GraphNode::new(Article::new(url("Tee")), 1));

        g.add_edge(&url("Kaffee"), &url("Tee"));

        assert!(g.root().outgoing().contains(&url("Tee")));
        assert!(g.get(&url("Tee")).unwrap().incoming().contains(&url("Kaffee")));
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_self_edge() {
        let mut g = graph();
        g.add_edge(&url("Kaffee"), &url("Kaffee"));

        assert_eq!(g.root().out_degree(), 1);
        assert_eq!(g.root().in_degree(), 1);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_add_edge_with_unknown_endpoint_changes_nothing() {
        let mut g = graph();
        g.add_edge(&url("Kaffee"), &url("Tee"));
        assert_eq!(g.root().out_degree(), 0);
        g.add_edge(&url("Tee"), &url("Kaffee"));
        assert_eq!(g.root().in_degree(), 0);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let mut g = graph();
        g.insert(GraphNode::new(Article::new(url("Tee")), 1));
        let mut broken: Graph = g.clone();
        broken.root = url("Weg");
        assert!(broken.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_depth_beyond_bound() {
        let mut g = Graph::new(Article::new(url("Kaffee")), 500, 1);
        g.insert(GraphNode::new(Article::new(url("Tee")), 2));
        assert!(g.validate().is_err());
    }
}
