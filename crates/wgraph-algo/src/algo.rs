//! [`GraphAlgo`]: one owned graph plus the algorithms that run on it.

use std::path::Path;

use tracing::warn;
use wgraph_core::{DiGraph, GraphError, NodeId};

use crate::config::EngineConfig;
use crate::persist;
use crate::scc::{self, Component};
use crate::shortest_path::{self, ShortestPath};

/// Owns a [`DiGraph`] and runs queries, loads and saves against it.
#[derive(Debug, Clone, Default)]
pub struct GraphAlgo {
    graph: DiGraph,
    config: EngineConfig,
}

impl GraphAlgo {
    #[must_use]
    pub fn new(graph: DiGraph) -> Self {
        Self::with_config(graph, EngineConfig::default())
    }

    #[must_use]
    pub const fn with_config(graph: DiGraph, config: EngineConfig) -> Self {
        Self { graph, config }
    }

    #[must_use]
    pub const fn graph(&self) -> &DiGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut DiGraph {
        &mut self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> DiGraph {
        self.graph
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn shortest_path(&self, src: NodeId, dst: NodeId) -> ShortestPath {
        shortest_path::shortest_path(&self.graph, src, dst)
    }

    #[must_use]
    pub fn shortest_path_dist(&self, src: NodeId, dst: NodeId) -> f64 {
        shortest_path::shortest_path_dist(&self.graph, src, dst)
    }

    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is not in the graph.
    pub fn connected_component(&self, id: NodeId) -> Result<Component, GraphError> {
        scc::connected_component(&self.graph, id)
    }

    #[must_use]
    pub fn connected_components(&self) -> Vec<Component> {
        scc::connected_components(&self.graph)
    }

    /// Save the owned graph to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GraphError> {
        persist::save(&self.graph, path, self.config.save.pretty)
    }

    /// Replace the owned graph with the one stored at `path`.
    ///
    /// On any failure the owned graph is reset to empty, never left holding
    /// the previous graph or a partial one.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] or [`GraphError::Parse`] as
    /// [`persist::load`] does.
    pub fn load(&mut self, path: &Path) -> Result<(), GraphError> {
        match persist::load(path, &self.config.placement) {
            Ok(graph) => {
                self.graph = graph;
                Ok(())
            }
            Err(err) => {
                warn!(code = %err.code(), "load failed; graph reset to empty");
                self.graph = DiGraph::new();
                Err(err)
            }
        }
    }
}
