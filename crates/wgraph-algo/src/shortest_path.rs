//! Single-source shortest path (Dijkstra) over non-negative weights.
//!
//! # Tie-break
//!
//! The frontier pops the smallest tentative distance first and, among equal
//! distances, the smallest vertex id. A vertex's parent only changes on a
//! strictly shorter distance, so when two predecessors offer the same
//! distance the one finalized first (lower distance, then lower id) wins.
//!
//! The search runs until the frontier is empty; it does not stop early at
//! the destination.
//!
//! # Overflow
//!
//! Edge weights are finite, but a sum of very large weights can still
//! overflow to `+∞`. Such a route is not a usable path: the vertex it leads to
//! is left unreached by that route rather than given an infinite distance.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::{instrument, trace};
use wgraph_core::{DiGraph, NodeId};

/// Distance and vertex sequence of a shortest path.
///
/// `distance` is `f64::INFINITY` and `path` is empty when no directed path
/// exists or either endpoint is unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub distance: f64,
    pub path: Vec<NodeId>,
}

impl ShortestPath {
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            distance: f64::INFINITY,
            path: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Frontier entry; ordered so that `BinaryHeap` pops the minimum.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    id: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Shortest path from `src` to `dst`.
///
/// `src == dst` (for a known vertex) yields distance `0` and the one-vertex
/// path `[src]`.
#[must_use]
#[instrument(skip(graph))]
pub fn shortest_path(graph: &DiGraph, src: NodeId, dst: NodeId) -> ShortestPath {
    if !graph.contains(src) || !graph.contains(dst) {
        trace!("unknown endpoint");
        return ShortestPath::unreachable();
    }
    if src == dst {
        return ShortestPath {
            distance: 0.0,
            path: vec![src],
        };
    }

    let (dist, parent) = dijkstra(graph, src);

    let Some(&distance) = dist.get(&dst) else {
        trace!("destination unreachable");
        return ShortestPath::unreachable();
    };

    let mut path = vec![dst];
    let mut cursor = dst;
    while cursor != src {
        let Some(&prev) = parent.get(&cursor) else {
            return ShortestPath::unreachable();
        };
        path.push(prev);
        cursor = prev;
    }
    path.reverse();

    ShortestPath { distance, path }
}

/// Distance only; `f64::INFINITY` when unreachable.
#[must_use]
pub fn shortest_path_dist(graph: &DiGraph, src: NodeId, dst: NodeId) -> f64 {
    shortest_path(graph, src, dst).distance
}

/// Distances to every vertex reachable from `src`, keyed by id.
///
/// Unreachable vertices are absent from the map.
#[must_use]
pub fn distances_from(graph: &DiGraph, src: NodeId) -> HashMap<NodeId, f64> {
    if !graph.contains(src) {
        return HashMap::new();
    }
    dijkstra(graph, src).0
}

/// Full single-source run. Returns finite distances and parent pointers.
fn dijkstra(graph: &DiGraph, src: NodeId) -> (HashMap<NodeId, f64>, HashMap<NodeId, NodeId>) {
    let mut dist: HashMap<NodeId, f64> = HashMap::from([(src, 0.0)]);
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    let mut done: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::from([Frontier { dist: 0.0, id: src }]);

    while let Some(Frontier { dist: d, id: u }) = frontier.pop() {
        if !done.insert(u) {
            continue;
        }

        let Ok(neighbours) = graph.out_edges(u) else {
            continue;
        };
        for (&v, &w) in neighbours {
            if done.contains(&v) {
                continue;
            }
            let candidate = d + w;
            if !candidate.is_finite() {
                trace!(from = u, to = v, "route overflows");
                continue;
            }
            let better = dist.get(&v).is_none_or(|&current| candidate < current);
            if better {
                dist.insert(v, candidate);
                parent.insert(v, u);
                frontier.push(Frontier { dist: candidate, id: v });
            }
        }
    }

    (dist, parent)
}
