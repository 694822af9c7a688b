//! Property tests checking the algorithms against petgraph as an oracle.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph as PgGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use proptest::prelude::*;
use wgraph_algo::{connected_component, connected_components, distances_from, shortest_path};
use wgraph_core::{DiGraph, NodeId};

type EdgeSpec = (NodeId, NodeId, f64);

/// Ordinary weights plus the boundary of the accepted domain. `1e300` keeps
/// every simple path finite, so petgraph's sums stay comparable.
fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => 0.0..50.0_f64,
        1 => Just(0.0),
        1 => Just(1e300),
    ]
}

fn arb_graph() -> impl Strategy<Value = (NodeId, Vec<EdgeSpec>)> {
    (1..16_i64).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, arb_weight()), 0..60),
        )
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

fn build(n: NodeId, edges: &[EdgeSpec], ids: impl IntoIterator<Item = NodeId>) -> DiGraph {
    let mut g = DiGraph::new();
    for id in ids {
        let _ = g.add_vertex(id, None);
    }
    for id in 0..n {
        let _ = g.add_vertex(id, None);
    }
    for &(s, d, w) in edges {
        let _ = g.add_edge(s, d, w);
    }
    g
}

fn to_petgraph(g: &DiGraph) -> (PgGraph<NodeId, f64>, HashMap<NodeId, NodeIndex>) {
    let mut pg = PgGraph::new();
    let mut map = HashMap::new();
    for id in g.node_ids() {
        map.insert(id, pg.add_node(id));
    }
    for e in g.edges() {
        pg.add_edge(map[&e.src], map[&e.dst], e.weight);
    }
    (pg, map)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn components_partition_and_match_tarjan((n, edges) in arb_graph()) {
        let g = build(n, &edges, std::iter::empty::<NodeId>());
        let ours = connected_components(&g);

        let mut seen = BTreeSet::new();
        for component in &ours {
            prop_assert!(!component.is_empty());
            for &id in component {
                prop_assert!(seen.insert(id), "vertex {} in two components", id);
            }
        }
        let all: BTreeSet<NodeId> = g.node_ids().collect();
        prop_assert_eq!(&seen, &all);

        let mins: Vec<NodeId> = ours.iter().filter_map(|c| c.first().copied()).collect();
        let mut sorted = mins.clone();
        sorted.sort_unstable();
        prop_assert_eq!(mins, sorted);

        let (pg, _) = to_petgraph(&g);
        let mut expected: Vec<BTreeSet<NodeId>> = petgraph::algo::tarjan_scc(&pg)
            .into_iter()
            .map(|c| c.into_iter().map(|idx| pg[idx]).collect())
            .collect();
        expected.sort_unstable_by_key(|c| c.first().copied());
        prop_assert_eq!(&ours, &expected);

        for component in &ours {
            for &id in component {
                prop_assert_eq!(&connected_component(&g, id).expect("known vertex"), component);
            }
        }
    }

    #[test]
    fn components_ignore_insertion_order((n, edges) in arb_graph()) {
        let forward = build(n, &edges, 0..n);
        let mut reversed_edges = edges.clone();
        reversed_edges.reverse();
        let backward = build(n, &reversed_edges, (0..n).rev());
        prop_assert_eq!(connected_components(&forward), connected_components(&backward));
    }

    #[test]
    fn distances_match_petgraph_dijkstra((n, edges) in arb_graph()) {
        let g = build(n, &edges, std::iter::empty::<NodeId>());
        let (pg, map) = to_petgraph(&g);

        for src in 0..n {
            let expected = petgraph::algo::dijkstra(&pg, map[&src], None, |e| *e.weight());
            let ours = distances_from(&g, src);
            prop_assert_eq!(ours.len(), expected.len());

            for dst in 0..n {
                let result = shortest_path(&g, src, dst);
                match expected.get(&map[&dst]) {
                    Some(&d) => {
                        prop_assert!(close(result.distance, d), "{} vs {}", result.distance, d);
                        prop_assert_eq!(result.path.first().copied(), Some(src));
                        prop_assert_eq!(result.path.last().copied(), Some(dst));
                        let walked: f64 = result
                            .path
                            .windows(2)
                            .map(|w| g.edge_weight(w[0], w[1]).expect("path follows edges"))
                            .sum();
                        prop_assert!(close(walked, result.distance));
                    }
                    None => {
                        prop_assert!(result.distance.is_infinite());
                        prop_assert!(result.path.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn unreachable_or_overflowing_routes_have_empty_paths(
        n in 2..10_i64,
        edges in prop::collection::vec(
            (0..10_i64, 0..10_i64, prop_oneof![Just(f64::MAX), 0.0..5.0_f64]),
            0..40,
        ),
    ) {
        let g = build(n, &edges, std::iter::empty::<NodeId>());
        for src in 0..n {
            let reached = distances_from(&g, src);
            prop_assert!(reached.values().all(|d| d.is_finite()));
            for dst in 0..n {
                let result = shortest_path(&g, src, dst);
                prop_assert_eq!(result.is_reachable(), !result.path.is_empty());
                prop_assert_eq!(result.is_reachable(), reached.contains_key(&dst));
            }
        }
    }
}
