pub mod builder;
pub mod error;
pub mod export;
pub mod graph;
pub mod node;
pub mod persist;
pub mod stats;

pub use builder::{CrawlOutcome, CrawlReport, GraphBuilder, ProgressCallback, Termination};
pub use error::GraphError;
pub use graph::Graph;
pub use node::GraphNode;
