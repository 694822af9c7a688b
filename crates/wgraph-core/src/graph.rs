//! The mutable directed graph store.
//!
//! # Indexes
//!
//! Every edge `src → dst` with weight `w` is recorded twice: in the outgoing
//! index under `src` and in the incoming index under `dst`. Both indexes are
//! private and only the mutation methods on [`DiGraph`] touch them, so the two
//! copies can never disagree.
//!
//! # Counters
//!
//! - The edge counter moves in lock-step with actual inserts and deletes.
//! - The modification counter grows by one per atomic structural change.
//!   Removing a vertex with `k` incident edges bumps it by `k + 1`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, trace};

use crate::error::GraphError;
use crate::model::{Edge, Node, NodeId, Position};

type Adjacency = HashMap<NodeId, HashMap<NodeId, f64>>;

/// A directed, weighted graph without self-loops or parallel edges.
#[derive(Debug, Clone, Default)]
pub struct DiGraph {
    nodes: BTreeMap<NodeId, Node>,
    outgoing: Adjacency,
    incoming: Adjacency,
    edge_count: usize,
    mod_count: u64,
}

impl DiGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Monotonic count of structural changes since construction.
    #[must_use]
    pub const fn mod_count(&self) -> u64 {
        self.mod_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// All vertices in ascending id order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// All vertex ids in ascending order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    #[must_use]
    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.edge_weight(src, dst).is_some()
    }

    #[must_use]
    pub fn edge_weight(&self, src: NodeId, dst: NodeId) -> Option<f64> {
        self.outgoing.get(&src)?.get(&dst).copied()
    }

    /// Outgoing neighbours of `id`, keyed by destination.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is not in the graph. A
    /// vertex with no outgoing edges yields an empty map instead.
    pub fn out_edges(&self, id: NodeId) -> Result<&HashMap<NodeId, f64>, GraphError> {
        self.outgoing.get(&id).ok_or(GraphError::VertexNotFound(id))
    }

    /// Incoming neighbours of `id`, keyed by source.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is not in the graph.
    pub fn in_edges(&self, id: NodeId) -> Result<&HashMap<NodeId, f64>, GraphError> {
        self.incoming.get(&id).ok_or(GraphError::VertexNotFound(id))
    }

    /// Every edge, sorted by `(src, dst)`.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .outgoing
            .iter()
            .flat_map(|(&src, targets)| {
                targets
                    .iter()
                    .map(move |(&dst, &weight)| Edge { src, dst, weight })
            })
            .collect();
        edges.sort_unstable_by_key(|e| (e.src, e.dst));
        edges
    }

    /// Insert a vertex with no edges.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateVertex`] if `id` is already present.
    /// - [`GraphError::InvalidPosition`] if `pos` has a non-finite coordinate.
    pub fn add_vertex(&mut self, id: NodeId, pos: Option<Position>) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            debug!(id, "add_vertex rejected: duplicate");
            return Err(GraphError::DuplicateVertex(id));
        }
        check_position(id, pos)?;

        self.nodes.insert(id, Node { id, pos });
        self.outgoing.insert(id, HashMap::new());
        self.incoming.insert(id, HashMap::new());
        self.mod_count += 1;
        trace!(id, "vertex added");
        Ok(())
    }

    /// Remove a vertex together with every edge touching it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is absent.
    pub fn remove_vertex(&mut self, id: NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&id) {
            debug!(id, "remove_vertex rejected: not found");
            return Err(GraphError::VertexNotFound(id));
        }

        let out = self.outgoing.remove(&id).unwrap_or_default();
        for dst in out.keys() {
            if let Some(sources) = self.incoming.get_mut(dst) {
                sources.remove(&id);
            }
            self.edge_count -= 1;
            self.mod_count += 1;
        }

        let inc = self.incoming.remove(&id).unwrap_or_default();
        for src in inc.keys() {
            if let Some(targets) = self.outgoing.get_mut(src) {
                targets.remove(&id);
            }
            self.edge_count -= 1;
            self.mod_count += 1;
        }

        self.nodes.remove(&id);
        self.mod_count += 1;
        trace!(id, removed_edges = out.len() + inc.len(), "vertex removed");
        Ok(())
    }

    /// Insert the edge `src → dst`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::VertexNotFound`] if either endpoint is absent.
    /// - [`GraphError::SelfLoop`] if `src == dst`.
    /// - [`GraphError::InvalidWeight`] if `weight` is negative, NaN or infinite.
    /// - [`GraphError::DuplicateEdge`] if the edge already exists.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, weight: f64) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&src) {
            debug!(src, dst, "add_edge rejected: missing source");
            return Err(GraphError::VertexNotFound(src));
        }
        if !self.nodes.contains_key(&dst) {
            debug!(src, dst, "add_edge rejected: missing destination");
            return Err(GraphError::VertexNotFound(dst));
        }
        if src == dst {
            debug!(src, "add_edge rejected: self-loop");
            return Err(GraphError::SelfLoop(src));
        }
        if !weight.is_finite() || weight < 0.0 {
            debug!(src, dst, weight, "add_edge rejected: invalid weight");
            return Err(GraphError::InvalidWeight { src, dst, weight });
        }
        if self.has_edge(src, dst) {
            debug!(src, dst, "add_edge rejected: duplicate");
            return Err(GraphError::DuplicateEdge { src, dst });
        }

        self.outgoing.entry(src).or_default().insert(dst, weight);
        self.incoming.entry(dst).or_default().insert(src, weight);
        self.edge_count += 1;
        self.mod_count += 1;
        trace!(src, dst, weight, "edge added");
        Ok(())
    }

    /// Delete the edge `src → dst` from both indexes.
    ///
    /// # Errors
    ///
    /// - [`GraphError::VertexNotFound`] if `src` is absent.
    /// - [`GraphError::EdgeNotFound`] if there is no such edge.
    pub fn remove_edge(&mut self, src: NodeId, dst: NodeId) -> Result<(), GraphError> {
        let Some(targets) = self.outgoing.get_mut(&src) else {
            debug!(src, dst, "remove_edge rejected: missing source");
            return Err(GraphError::VertexNotFound(src));
        };
        if targets.remove(&dst).is_none() {
            debug!(src, dst, "remove_edge rejected: no such edge");
            return Err(GraphError::EdgeNotFound { src, dst });
        }
        if let Some(sources) = self.incoming.get_mut(&dst) {
            sources.remove(&src);
        }

        self.edge_count -= 1;
        self.mod_count += 1;
        trace!(src, dst, "edge removed");
        Ok(())
    }

    /// Replace the position of `id`. Not a structural change.
    ///
    /// # Errors
    ///
    /// - [`GraphError::VertexNotFound`] if `id` is absent.
    /// - [`GraphError::InvalidPosition`] if `pos` has a non-finite coordinate.
    pub fn set_position(&mut self, id: NodeId, pos: Option<Position>) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::VertexNotFound(id))?;
        check_position(id, pos)?;
        node.pos = pos;
        Ok(())
    }
}

/// Non-finite coordinates cannot be written back in the `"x,y,z"` form.
fn check_position(id: NodeId, pos: Option<Position>) -> Result<(), GraphError> {
    match pos {
        Some(pos) if !pos.is_finite() => {
            debug!(id, %pos, "position rejected: non-finite");
            Err(GraphError::InvalidPosition { id, pos })
        }
        _ => Ok(()),
    }
}

impl fmt::Display for DiGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.nodes.keys() {
            let mut targets: Vec<(NodeId, f64)> = self
                .outgoing
                .get(id)
                .map(|t| t.iter().map(|(&d, &w)| (d, w)).collect())
                .unwrap_or_default();
            targets.sort_unstable_by_key(|&(d, _)| d);

            write!(f, "{id}:")?;
            for (dst, w) in targets {
                write!(f, " {dst}({w})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
