//! Strongly connected components by double reachability.
//!
//! A vertex `v` shares a component with `id` iff `v` is reachable from `id`
//! and `id` is reachable from `v`. Two depth-first passes compute this:
//!
//! 1. **Forward**: walk outgoing edges from `id`, marking every reached
//!    vertex *forward*.
//! 2. **Reverse**: walk incoming edges from `id`, stepping only into
//!    vertices already marked forward. Each vertex reached is
//!    *confirmed* and belongs to the component.
//!
//! Marks live in a map owned by a single call, never on the vertex records,
//! so repeated queries are independent of each other.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, instrument};
use wgraph_core::{DiGraph, GraphError, NodeId};

/// One strongly connected component, ordered by id.
pub type Component = BTreeSet<NodeId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Forward,
    Confirmed,
}

/// The strongly connected component containing `id`.
///
/// # Errors
///
/// Returns [`GraphError::VertexNotFound`] if `id` is not in the graph.
#[instrument(skip(graph))]
pub fn connected_component(graph: &DiGraph, id: NodeId) -> Result<Component, GraphError> {
    component_excluding(graph, id, &HashSet::new())
}

/// Partition every vertex into strongly connected components.
///
/// Components are returned in ascending order of their smallest member. The
/// result does not depend on the order vertices were inserted in.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn connected_components(graph: &DiGraph) -> Vec<Component> {
    let mut finalized: HashSet<NodeId> = HashSet::with_capacity(graph.vertex_count());
    let mut components = Vec::new();

    for id in graph.node_ids() {
        if finalized.contains(&id) {
            continue;
        }
        // `id` comes from the graph's own id set, so the lookup cannot miss.
        let Ok(component) = component_excluding(graph, id, &finalized) else {
            continue;
        };
        finalized.extend(component.iter().copied());
        components.push(component);
    }

    debug!(count = components.len(), "strongly connected components computed");
    components
}

/// Component of `id`, never stepping into vertices in `finalized`.
///
/// A vertex already assigned to another component cannot lie on a path
/// between two members of this one, so skipping it changes nothing.
fn component_excluding(
    graph: &DiGraph,
    id: NodeId,
    finalized: &HashSet<NodeId>,
) -> Result<Component, GraphError> {
    let out = graph.out_edges(id)?;
    let inc = graph.in_edges(id)?;
    if out.is_empty() || inc.is_empty() {
        return Ok(BTreeSet::from([id]));
    }

    let mut marks: HashMap<NodeId, Mark> = HashMap::from([(id, Mark::Forward)]);

    let mut stack = vec![id];
    while let Some(u) = stack.pop() {
        for &v in graph.out_edges(u)?.keys() {
            if finalized.contains(&v) || marks.contains_key(&v) {
                continue;
            }
            marks.insert(v, Mark::Forward);
            stack.push(v);
        }
    }

    let mut component = BTreeSet::from([id]);
    marks.insert(id, Mark::Confirmed);
    stack.push(id);
    while let Some(u) = stack.pop() {
        for &v in graph.in_edges(u)?.keys() {
            if marks.get(&v) == Some(&Mark::Forward) {
                marks.insert(v, Mark::Confirmed);
                component.insert(v);
                stack.push(v);
            }
        }
    }

    Ok(component)
}
