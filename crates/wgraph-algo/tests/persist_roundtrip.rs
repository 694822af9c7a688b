use std::collections::BTreeSet;

use proptest::prelude::*;
use tempfile::TempDir;
use wgraph_algo::config::PlacementConfig;
use wgraph_algo::{GraphAlgo, persist};
use wgraph_core::{DiGraph, NodeId, Position};

fn cross_linked() -> DiGraph {
    let mut g = DiGraph::new();
    for id in 0..8 {
        let pos = (id % 2 == 0).then(|| Position::new(35.2 + f64::from(id as i32) * 0.001, 32.1, 0.0));
        g.add_vertex(id, pos).expect("fresh vertex");
    }
    let edges: [(NodeId, NodeId, f64); 13] = [
        (0, 2, 1.1),
        (1, 0, 0.3),
        (1, 3, 2.0),
        (2, 1, 1.7),
        (2, 3, 0.25),
        (2, 4, 4.0),
        (3, 5, 1.0),
        (5, 3, 1.0),
        (4, 5, 0.125),
        (5, 7, 3.3),
        (6, 7, 0.1),
        (4, 6, 2.2),
        (6, 4, 0.7),
    ];
    for (s, d, w) in edges {
        g.add_edge(s, d, w).expect("fresh edge");
    }
    g
}

#[test]
fn save_then_load_is_isomorphic() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("graph.json");
    let original = cross_linked();

    persist::save(&original, &path, true).expect("writable");
    let placement = PlacementConfig {
        synthesize: false,
        ..PlacementConfig::default()
    };
    let loaded = persist::load(&path, &placement).expect("readable");

    let ids = |g: &DiGraph| g.node_ids().collect::<Vec<_>>();
    assert_eq!(ids(&loaded), ids(&original));
    assert_eq!(loaded.edge_count(), original.edge_count());
    for (a, b) in original.edges().iter().zip(loaded.edges().iter()) {
        assert_eq!((a.src, a.dst), (b.src, b.dst));
        assert!((a.weight - b.weight).abs() < 1e-12);
    }
    for node in original.nodes() {
        assert_eq!(loaded.node(node.id).map(|n| n.pos), Some(node.pos));
    }
}

#[test]
fn algorithms_agree_after_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("graph.json");
    GraphAlgo::new(cross_linked()).save(&path).expect("writable");

    let mut algo = GraphAlgo::default();
    algo.load(&path).expect("readable");

    let components: Vec<Vec<NodeId>> = algo
        .connected_components()
        .into_iter()
        .map(|c| c.into_iter().collect())
        .collect();
    assert_eq!(components, vec![vec![0, 1, 2], vec![3, 5], vec![4, 6], vec![7]]);
    assert_eq!(algo.connected_component(2).expect("known"), BTreeSet::from([0, 1, 2]));

    // 0 -> 2 -> 3 -> 5 -> 7 = 1.1 + 0.25 + 1.0 + 3.3
    let route = algo.shortest_path(0, 7);
    assert_eq!(route.path, vec![0, 2, 3, 5, 7]);
    assert!((route.distance - 5.65).abs() < 1e-9);

    assert!(!algo.shortest_path(7, 0).is_reachable());
}

#[test]
fn synthesized_positions_survive_save() {
    let dir = TempDir::new().expect("temp dir");
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    std::fs::write(
        &first,
        r#"{"Nodes": [{"id": 3}, {"id": 1, "pos": null}], "Edges": [{"src": 1, "dest": 3, "w": 2}]}"#,
    )
    .expect("write fixture");

    let placement = PlacementConfig {
        seed: Some(1),
        ..PlacementConfig::default()
    };
    let g = persist::load(&first, &placement).expect("readable");
    assert!(g.nodes().all(|n| n.pos.is_some()));

    persist::save(&g, &second, false).expect("writable");
    let reloaded = persist::load(&second, &PlacementConfig::default()).expect("readable");
    for node in g.nodes() {
        assert_eq!(reloaded.node(node.id).and_then(|n| n.pos), node.pos);
    }
}

fn arb_position() -> impl Strategy<Value = Option<Position>> {
    prop::option::of(
        (-1e6..1e6_f64, -1e6..1e6_f64, -1e3..1e3_f64).prop_map(|(x, y, z)| Position::new(x, y, z)),
    )
}

fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        6 => 0.0..100.0_f64,
        1 => Just(0.0),
        1 => Just(f64::MAX),
        1 => Just(f64::MIN_POSITIVE),
    ]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn random_graphs_round_trip(
        nodes in prop::collection::vec((0..20_i64, arb_position()), 0..20),
        edges in prop::collection::vec((0..20_i64, 0..20_i64, arb_weight()), 0..60),
        pretty in any::<bool>(),
    ) {
        let mut g = DiGraph::new();
        for (id, pos) in nodes {
            let _ = g.add_vertex(id, pos);
        }
        for (s, d, w) in edges {
            let _ = g.add_edge(s, d, w);
        }

        let dir = TempDir::new().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let path = dir.path().join("graph.json");
        persist::save(&g, &path, pretty).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let placement = PlacementConfig {
            synthesize: false,
            ..PlacementConfig::default()
        };
        let loaded = persist::load(&path, &placement).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(loaded.nodes().cloned().collect::<Vec<_>>(), g.nodes().cloned().collect::<Vec<_>>());
        prop_assert_eq!(loaded.edges(), g.edges());
        prop_assert_eq!(loaded.mod_count(), (g.vertex_count() + g.edge_count()) as u64);
        for src in g.node_ids() {
            for dst in g.node_ids() {
                prop_assert_eq!(
                    wgraph_algo::shortest_path(&loaded, src, dst),
                    wgraph_algo::shortest_path(&g, src, dst)
                );
            }
        }
    }
}
