use crate::error::{GraphError, Result};
use crate::graph::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, Graph};
use crate::node::GraphNode;
use futures::StreamExt;
use futures::stream;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use wikigraph_crawler::{Article, CanonicalUrl, FetchContext, ReferenceExtractor};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Reports the visited-node count and the URL just processed.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// How a crawl came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every layer up to the depth bound was expanded.
    DepthExhausted,
    /// The node table hit its configured maximum size.
    BoundReached,
    /// A layer produced no expandable frontier.
    FrontierExhausted,
}

/// Advisory statistics gathered during a crawl. Termination decisions never
/// depend on them.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub termination: Termination,
    pub layers_expanded: usize,
    pub nodes_expanded: usize,
    pub failed_expansions: usize,
    pub references_seen: usize,
    pub total_expansion_time: Duration,
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Running average of per-node expansion time.
    pub fn mean_expansion_time(&self) -> Option<Duration> {
        (self.nodes_expanded > 0).then(|| self.total_expansion_time / self.nodes_expanded as u32)
    }

    /// Running average of per-node fan-out.
    pub fn mean_fanout(&self) -> Option<f64> {
        (self.nodes_expanded > 0)
            .then(|| self.references_seen as f64 / self.nodes_expanded as f64)
    }
}

/// A built graph together with the crawl's advisory report.
pub struct CrawlOutcome {
    pub graph: Graph,
    pub report: CrawlReport,
}

/// The traversal engine: expands the graph layer by layer around a seed
/// article until the depth bound, the size bound or an empty frontier ends
/// the crawl.
///
/// Within one layer, per-node fetch-and-extract work runs on a bounded
/// worker pool; results are consumed in frontier order by the single owner
/// of the node table, which serializes every insertion, edge addition and
/// size check. That makes slot allocation under the size bound strict: the
/// final node and edge sets are deterministic for deterministic extraction.
pub struct GraphBuilder {
    ctx: FetchContext,
    extractor: Arc<dyn ReferenceExtractor>,
    max_depth: usize,
    max_nodes: usize,
    concurrency: usize,
    progress_callback: Option<ProgressCallback>,
}

impl GraphBuilder {
    pub fn new(extractor: Arc<dyn ReferenceExtractor>) -> Self {
        Self {
            ctx: FetchContext::new(),
            extractor,
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            concurrency: DEFAULT_CONCURRENCY,
            progress_callback: None,
        }
    }

    pub fn with_fetch_context(mut self, ctx: FetchContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Builds the reference graph around `seed`.
    ///
    /// A malformed seed fails before any fetch. Per-node fetch and parse
    /// failures are recorded and skipped; they never abort the crawl.
    pub async fn build(&self, seed: &str) -> Result<CrawlOutcome> {
        let root = CanonicalUrl::parse(seed).map_err(|e| GraphError::Validation(e.to_string()))?;
        info!(
            "building graph around {root} (depth <= {}, nodes <= {})",
            self.max_depth, self.max_nodes
        );

        let crawl_started = Instant::now();
        let mut graph = Graph::new(Article::new(root), self.max_nodes, self.max_depth);

        let mut termination = Termination::DepthExhausted;
        let mut layers_expanded = 0;
        let mut nodes_expanded = 0;
        let mut failed_expansions = 0;
        let mut references_seen = 0;
        let mut total_expansion_time = Duration::ZERO;

        if graph.node_count() >= self.max_nodes {
            // A bound of one is already filled by the root.
            termination = Termination::BoundReached;
        } else {
            'layers: for depth in 0..self.max_depth {
                // Snapshot the frontier before any table mutation; the live
                // table is never iterated while inserting.
                let frontier: Vec<CanonicalUrl> = graph
                    .nodes()
                    .filter(|node| node.depth() == depth)
                    .map(|node| node.url().clone())
                    .collect();
                if frontier.is_empty() {
                    termination = Termination::FrontierExhausted;
                    break;
                }
                debug!("expanding layer {depth}: {} node(s)", frontier.len());

                let mut expansions = stream::iter(frontier.into_iter().map(|url| {
                    let ctx = self.ctx.clone();
                    let extractor = Arc::clone(&self.extractor);
                    async move {
                        let started = Instant::now();
                        let mut article = Article::new(url.clone());
                        let references = article.references(&ctx, extractor.as_ref()).await;
                        (url, article, references, started.elapsed())
                    }
                }))
                .buffered(self.concurrency);

                // All table mutation happens here, in frontier order.
                while let Some((url, article, references, took)) = expansions.next().await {
                    match references {
                        Err(err) => {
                            warn!("skipping {url}: {err}");
                            graph.mark_failed(&url);
                            failed_expansions += 1;
                        }
                        Ok(references) => {
                            nodes_expanded += 1;
                            references_seen += references.len();
                            total_expansion_time += took;
                            if let Some(title) = article.title() {
                                graph.set_title(&url, title.to_string());
                            }
                            for reference in references {
                                if graph.contains(&reference) {
                                    graph.add_edge(&url, &reference);
                                    continue;
                                }
                                graph.insert(GraphNode::new(
                                    Article::new(reference.clone()),
                                    depth + 1,
                                ));
                                graph.add_edge(&url, &reference);
                                if graph.node_count() >= self.max_nodes {
                                    termination = Termination::BoundReached;
                                    // Dropping the stream discards in-flight
                                    // fetches instead of awaiting them.
                                    break 'layers;
                                }
                            }
                        }
                    }
                    if let Some(ref callback) = self.progress_callback {
                        callback(graph.node_count(), url.to_string());
                    }
                }
                layers_expanded += 1;
            }
        }

        let report = CrawlReport {
            termination,
            layers_expanded,
            nodes_expanded,
            failed_expansions,
            references_seen,
            total_expansion_time,
            elapsed: crawl_started.elapsed(),
        };
        info!(
            "crawl complete: {} node(s), {} edge(s), {:?}",
            graph.node_count(),
            graph.edge_count(),
            report.termination
        );
        Ok(CrawlOutcome { graph, report })
    }
}
