use crate::error::{GraphError, Result};
use crate::graph::Graph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    created_at: DateTime<Utc>,
    graph: &'a Graph,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    created_at: DateTime<Utc>,
    graph: Graph,
}

/// Fails unless `path` points at a fresh file inside an existing directory.
pub fn ensure_fresh_path(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(GraphError::DestinationExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(GraphError::BadDestination {
            path: path.to_path_buf(),
            reason: format!("{} is not a directory", parent.display()),
        });
    }
    Ok(())
}

impl Graph {
    /// Writes a versioned snapshot of the full graph (node table, edges,
    /// bounds) to `path`. Existing files are never overwritten.
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_fresh_path(path)?;
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            graph: self,
        };
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &snapshot)
            .map_err(|e| GraphError::Encode(e.to_string()))?;
        info!("saved graph of {} node(s) to {}", self.node_count(), path.display());
        Ok(())
    }

    /// Reads a snapshot back. Anything that does not decode to a valid
    /// graph, including version mismatches and broken adjacency, is
    /// rejected.
    pub fn load(path: &Path) -> Result<Graph> {
        let file = File::open(path)?;
        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| GraphError::Decode(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GraphError::Decode(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        snapshot.graph.validate().map_err(GraphError::Decode)?;
        info!(
            "loaded graph of {} node(s), saved {}",
            snapshot.graph.node_count(),
            snapshot.created_at
        );
        Ok(snapshot.graph)
    }
}
