//! End-to-end invariants for the graph builders and activation engines.

use phenome_core::{
    bipolar_tanh, depth, AcyclicActivation, CyclicActivation, CyclicGraph, DagGraph, WeightedConnection,
};
use proptest::prelude::*;

fn diamond_connections() -> Vec<WeightedConnection> {
    vec![
        WeightedConnection::new(0, 2, 1.0),
        WeightedConnection::new(2, 1, 1.0),
        WeightedConnection::new(0, 3, 1.0),
        WeightedConnection::new(3, 4, 1.0),
        WeightedConnection::new(4, 1, 1.0),
    ]
}

#[test]
fn diamond_depth_is_longest_path() {
    let graph = CyclicGraph::build(&diamond_connections(), 1, 1).unwrap();
    let info = depth::analyze(&graph).unwrap();
    assert_eq!(info.node_depth[1], 3); // output reached via the 3-hop path
    assert_eq!(info.graph_depth, 4);
}

#[test]
fn layer_end_table_is_consistent_with_total_counts() {
    let graph = CyclicGraph::build(&diamond_connections(), 1, 1).unwrap();
    let info = depth::analyze(&graph).unwrap();
    let dag = DagGraph::build(&graph, &info).unwrap();

    let bounds = dag.layer_bounds();
    assert_eq!(bounds.len(), info.graph_depth);
    assert_eq!(bounds.last().unwrap().end_node_idx, dag.total_node_count());
    assert_eq!(bounds.last().unwrap().end_connection_idx, dag.connection_count());
    // Both cursors are non-decreasing across layers.
    assert!(bounds.windows(2).all(|w| w[0].end_node_idx <= w[1].end_node_idx));
    assert!(bounds.windows(2).all(|w| w[0].end_connection_idx <= w[1].end_connection_idx));
}

#[test]
fn self_loop_cyclic_network_converges() {
    let connections = vec![
        WeightedConnection::new(0, 2, 1.0),
        WeightedConnection::new(2, 2, 0.3),
        WeightedConnection::new(2, 1, 1.0),
    ];
    let graph = CyclicGraph::build(&connections, 1, 1).unwrap();
    let mut engine = CyclicActivation::new(graph, bipolar_tanh);

    let a = engine.activate(&[0.5], 40).to_vec();
    engine.reset_state();
    let b = engine.activate(&[0.5], 41).to_vec();
    assert!((a[0] - b[0]).abs() < 1e-4, "expected convergence, got {a:?} vs {b:?}");
}

#[test]
fn cyclic_and_acyclic_engines_agree_on_a_feedforward_network() {
    let connections = diamond_connections();
    let cyclic_graph = CyclicGraph::build(&connections, 1, 1).unwrap();
    let info = depth::analyze(&cyclic_graph).unwrap();
    let dag = DagGraph::build(&cyclic_graph, &info).unwrap();

    let mut cyclic = CyclicActivation::new(cyclic_graph, bipolar_tanh);
    let mut acyclic = AcyclicActivation::new(dag, bipolar_tanh);

    // A purely feedforward network reaches its fixed point after
    // graph_depth iterations; run a few extra to be safe.
    let from_cyclic = cyclic.activate(&[0.37], info.graph_depth + 2).to_vec();
    let from_acyclic = acyclic.activate(&[0.37]);

    assert!((from_cyclic[0] - from_acyclic[0]).abs() < 1e-5);
}

proptest! {
    /// Builder contract (section 8): every connection's remapped source and
    /// target index is within bounds, and the connection array stays sorted
    /// by (source, target) no matter how scrambled or sparse the input ids
    /// are.
    #[test]
    fn builder_remaps_and_sorts_for_arbitrary_sparse_ids(
        raw_ids in prop::collection::vec((0i32..5000, 0i32..5000), 1..40),
        weights in prop::collection::vec(-10.0f32..10.0, 1..40),
    ) {
        let n = raw_ids.len().min(weights.len());
        let connections: Vec<WeightedConnection> = raw_ids[..n]
            .iter()
            .zip(&weights[..n])
            .map(|(&(s, t), &w)| WeightedConnection::new(s, t, w))
            .collect();

        let graph = CyclicGraph::build(&connections, 2, 2).unwrap();

        for (&s, &t) in graph.source_ids().iter().zip(graph.target_ids()) {
            prop_assert!(s < graph.total_node_count());
            prop_assert!(t < graph.total_node_count());
        }

        let pairs: Vec<(usize, usize)> =
            graph.source_ids().iter().zip(graph.target_ids()).map(|(&s, &t)| (s, t)).collect();
        let mut sorted = pairs.clone();
        sorted.sort();
        prop_assert_eq!(pairs, sorted);
    }

    /// Section 8: summing layer node counts across a DAG's layers always
    /// reproduces the graph's total node count, for any acyclic shape.
    #[test]
    fn layer_node_counts_always_sum_to_total(depth_count in 1usize..8, nodes_per_layer in 1usize..6) {
        // Build a strictly layered feedforward graph: depth_count layers of
        // nodes_per_layer nodes each, fully connected layer to layer.
        let mut connections = Vec::new();
        let mut next_id = (nodes_per_layer * 2) as i32; // reserve inputs/outputs-ish range
        let mut layer_ids: Vec<i32> = (0..nodes_per_layer as i32).collect();

        for _ in 1..depth_count {
            let next_layer: Vec<i32> = (0..nodes_per_layer).map(|i| next_id + i as i32).collect();
            next_id += nodes_per_layer as i32;
            for &src in &layer_ids {
                for &dst in &next_layer {
                    connections.push(WeightedConnection::new(src, dst, 0.1));
                }
            }
            layer_ids = next_layer;
        }

        let input_count = nodes_per_layer;
        let output_count = 0;
        let graph = CyclicGraph::build(&connections, input_count, output_count).unwrap();
        let info = depth::analyze(&graph).unwrap();
        let dag = DagGraph::build(&graph, &info).unwrap();

        prop_assert_eq!(dag.layer_bounds().last().unwrap().end_node_idx, dag.total_node_count());
    }
}
