//! JSON persistence for [`DiGraph`].
//!
//! # Schema
//!
//! ```text
//! {
//!   "Nodes": [ { "id": <int>, "pos": "<x>,<y>,<z>" | null }, ... ],
//!   "Edges": [ { "src": <int>, "dest": <int>, "w": <float> }, ... ]
//! }
//! ```
//!
//! Loading is all-or-nothing: a malformed record anywhere fails the whole
//! load and no partially built graph escapes. Duplicate vertices, duplicate
//! edges, self-loops and edges to unknown vertices are dropped silently, the
//! same way [`DiGraph::add_vertex`] and [`DiGraph::add_edge`] reject them.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use wgraph_core::{DiGraph, GraphError, NodeId, Position};

use crate::config::PlacementConfig;

#[derive(Debug, Serialize, Deserialize)]
struct GraphDocument {
    #[serde(rename = "Nodes")]
    nodes: Vec<NodeRecord>,
    #[serde(rename = "Edges")]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default)]
    pos: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    src: NodeId,
    dest: NodeId,
    w: f64,
}

impl GraphDocument {
    fn from_graph(graph: &DiGraph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .map(|n| NodeRecord {
                    id: n.id,
                    pos: n.pos.map(|p| p.to_string()),
                })
                .collect(),
            edges: graph
                .edges()
                .into_iter()
                .map(|e| EdgeRecord {
                    src: e.src,
                    dest: e.dst,
                    w: e.weight,
                })
                .collect(),
        }
    }

    fn into_graph(self, placement: &PlacementConfig) -> Result<DiGraph, String> {
        let mut rng = placement
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut graph = DiGraph::new();

        for record in self.nodes {
            let pos = match record.pos.as_deref() {
                Some(raw) => Some(
                    raw.parse::<Position>()
                        .map_err(|e| format!("vertex {}: bad pos {raw:?}: {e}", record.id))?,
                ),
                None if placement.synthesize => Some(synthesize(&mut rng, placement)),
                None => None,
            };
            match graph.add_vertex(record.id, pos) {
                Ok(()) => {}
                Err(err @ GraphError::InvalidPosition { .. }) => return Err(err.to_string()),
                Err(err) => debug!(%err, "skipping vertex record"),
            }
        }

        for record in self.edges {
            match graph.add_edge(record.src, record.dest, record.w) {
                Ok(()) => {}
                Err(err @ GraphError::InvalidWeight { .. }) => return Err(err.to_string()),
                Err(err) => debug!(%err, "skipping edge record"),
            }
        }

        Ok(graph)
    }
}

/// Placeholder position drawn uniformly from the configured bounding box.
fn synthesize(rng: &mut StdRng, placement: &PlacementConfig) -> Position {
    Position::new(
        sample(rng, placement.x_min, placement.x_max),
        sample(rng, placement.y_min, placement.y_max),
        placement.z,
    )
}

fn sample(rng: &mut StdRng, a: f64, b: f64) -> f64 {
    let (lo, hi) = (a.min(b), a.max(b));
    if lo.is_finite() && hi.is_finite() && lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Write `graph` to `path` in the graph schema.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the document cannot be encoded or the file
/// cannot be written.
#[instrument(skip(graph), fields(path = %path.display()))]
pub fn save(graph: &DiGraph, path: &Path, pretty: bool) -> Result<(), GraphError> {
    let doc = GraphDocument::from_graph(graph);
    let encoded = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    let text = encoded.map_err(|e| GraphError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;

    std::fs::write(path, text).map_err(|source| {
        warn!(%source, "save failed");
        GraphError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph saved"
    );
    Ok(())
}

/// Read a graph from `path`.
///
/// Vertices are inserted before edges, so the returned graph's modification
/// counter equals its vertex count plus its edge count.
///
/// # Errors
///
/// - [`GraphError::Io`] if the file cannot be read.
/// - [`GraphError::Parse`] if it is not valid JSON, violates the schema, has
///   a malformed `pos` string, a negative edge weight, or a synthesized
///   position that is not finite.
#[instrument(skip(placement), fields(path = %path.display()))]
pub fn load(path: &Path, placement: &PlacementConfig) -> Result<DiGraph, GraphError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        warn!(%source, "load failed: unreadable");
        GraphError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let parse_err = |reason: String| {
        warn!(%reason, "load failed: malformed");
        GraphError::Parse {
            path: path.to_path_buf(),
            reason,
        }
    };

    let doc: GraphDocument = serde_json::from_str(&text).map_err(|e| parse_err(e.to_string()))?;
    let graph = doc.into_graph(placement).map_err(parse_err)?;

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}
