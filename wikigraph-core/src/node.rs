use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use wikigraph_crawler::{Article, CanonicalUrl};

/// One visited article in the graph: the article itself, the depth at which
/// it was first discovered, and its adjacency.
///
/// Edges are stored as canonical-URL sets into the owning graph's node
/// table; a node never holds another node directly and never consults the
/// table itself. Depth is assigned once, at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    article: Article,
    depth: usize,
    outgoing: BTreeSet<CanonicalUrl>,
    incoming: BTreeSet<CanonicalUrl>,
    #[serde(default)]
    failed: bool,
}

impl GraphNode {
    pub fn new(article: Article, depth: usize) -> Self {
        Self {
            article,
            depth,
            outgoing: BTreeSet::new(),
            incoming: BTreeSet::new(),
            failed: false,
        }
    }

    pub fn url(&self) -> &CanonicalUrl {
        self.article.url()
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn title(&self) -> Option<&str> {
        self.article.title()
    }

    /// Display label: the article title when known, otherwise derived from
    /// the URL (leaf nodes at the depth bound are never fetched).
    pub fn label(&self) -> String {
        self.article
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| self.url().label())
    }

    /// Whether expanding this node failed (fetch or parse error).
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.article.set_title(title);
    }

    pub(crate) fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Adds a directed edge to `other`, keeping both adjacency sets in sync.
    pub fn link_to(&mut self, other: &mut GraphNode) {
        self.outgoing.insert(other.url().clone());
        other.incoming.insert(self.url().clone());
    }

    /// The self-referencing variant of `link_to` (an article may link to
    /// its own page).
    pub(crate) fn link_self(&mut self) {
        let url = self.url().clone();
        self.outgoing.insert(url.clone());
        self.incoming.insert(url);
    }

    pub fn outgoing(&self) -> &BTreeSet<CanonicalUrl> {
        &self.outgoing
    }

    pub fn incoming(&self) -> &BTreeSet<CanonicalUrl> {
        &self.incoming
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }
}
