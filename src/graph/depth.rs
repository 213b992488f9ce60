//! Depth Analyzer — spec.md section 4.2.

use crate::errors::{PhenomeError, PhenomeResult};
use crate::graph::cyclic::CyclicGraph;

/// Per-node longest-path depth from any input node, plus the number of
/// distinct depth layers in the graph.
///
/// `graph_depth` is `max(node_depth) + 1`, i.e. a layer *count*, not the bare
/// maximum depth value: the acyclic activation engine (section 4.5) walks
/// layers `0..graph_depth`, and the output layer must be included in that
/// range for every output to actually get computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthInfo {
    pub node_depth: Vec<usize>,
    pub graph_depth: usize,
}

struct Frame {
    node: usize,
    child_idx: usize,
}

/// Walks `graph` with an explicit stack (not recursion, to avoid blowing the
/// native stack on deep or adversarially-shaped genomes) computing the
/// longest path from any input node to each node. Input nodes start at depth
/// zero; everything else is relaxed upward as longer paths are discovered.
///
/// `graph` must be acyclic. A cycle is reported as `PhenomeError::CycleDetected`
/// rather than silently truncated, since a cyclic graph has no well-defined
/// longest path.
pub fn analyze(graph: &CyclicGraph) -> PhenomeResult<DepthInfo> {
    let n = graph.total_node_count();
    let adjacency = graph.adjacency();
    let mut node_depth = vec![0usize; n];
    let mut started = vec![false; n];
    let mut on_stack = vec![false; n];

    for start in 0..n {
        if started[start] {
            continue;
        }
        let mut stack = vec![Frame { node: start, child_idx: 0 }];
        on_stack[start] = true;
        started[start] = true;

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let children = &adjacency[node];

            if frame.child_idx < children.len() {
                let child = children[frame.child_idx];
                frame.child_idx += 1;

                if on_stack[child] {
                    return Err(PhenomeError::CycleDetected { node: child });
                }
                let candidate = node_depth[node] + 1;
                // A strictly longer path just reached `child`: its own
                // descendants may now need to grow too, so re-enter it even
                // if it was already fully explored along a shorter path.
                if candidate > node_depth[child] {
                    node_depth[child] = candidate;
                    started[child] = true;
                    on_stack[child] = true;
                    stack.push(Frame { node: child, child_idx: 0 });
                }
            } else {
                on_stack[node] = false;
                stack.pop();
            }
        }
    }

    let max_depth = node_depth.iter().copied().max().unwrap_or(0);
    Ok(DepthInfo {
        node_depth,
        graph_depth: max_depth + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::connection::WeightedConnection;

    #[test]
    fn linear_chain_depths() {
        // in(0) -> hidden(2) -> out(1)
        let conns = vec![
            WeightedConnection::new(0, 2, 1.0),
            WeightedConnection::new(2, 1, 1.0),
        ];
        let g = CyclicGraph::build(&conns, 1, 1).unwrap();
        let info = analyze(&g).unwrap();
        assert_eq!(info.node_depth[0], 0); // input
        assert_eq!(info.graph_depth, 3);
    }

    #[test]
    fn diamond_depth_takes_longest_path() {
        // in(0) -> h1(2) -> out(1); in(0) -> h2(3) -> h4(4) -> out(1)
        let conns = vec![
            WeightedConnection::new(0, 2, 1.0),
            WeightedConnection::new(2, 1, 1.0),
            WeightedConnection::new(0, 3, 1.0),
            WeightedConnection::new(3, 4, 1.0),
            WeightedConnection::new(4, 1, 1.0),
        ];
        let g = CyclicGraph::build(&conns, 1, 1).unwrap();
        let info = analyze(&g).unwrap();
        // out node depth should reflect the longer of the two paths (3).
        assert_eq!(info.node_depth[1], 3);
        assert_eq!(info.graph_depth, 4);
    }

    #[test]
    fn depth_improvement_propagates_to_descendants() {
        // in(0) -> B(2) -> D(4); in(0) -> C(3) -> B(2).
        // B's depth only settles to its true value (2, via C) after D has
        // already been visited along the shorter in->B path; D must be
        // revisited and bumped to 3 once B grows.
        let conns = vec![
            WeightedConnection::new(0, 2, 1.0),
            WeightedConnection::new(2, 4, 1.0),
            WeightedConnection::new(0, 3, 1.0),
            WeightedConnection::new(3, 2, 1.0),
        ];
        let g = CyclicGraph::build(&conns, 1, 1).unwrap();
        let info = analyze(&g).unwrap();
        assert_eq!(info.node_depth[2], 2); // B: via C, not the shorter in->B edge
        assert_eq!(info.node_depth[4], 3); // D: must pick up B's improved depth
    }

    #[test]
    fn detects_cycle() {
        let conns = vec![
            WeightedConnection::new(0, 2, 1.0),
            WeightedConnection::new(2, 3, 1.0),
            WeightedConnection::new(3, 2, 1.0),
        ];
        let g = CyclicGraph::build(&conns, 1, 1).unwrap();
        let err = analyze(&g).unwrap_err();
        assert!(matches!(err, PhenomeError::CycleDetected { .. }));
    }

    #[test]
    fn disconnected_nodes_stay_at_depth_zero() {
        let conns = vec![WeightedConnection::new(0, 1, 1.0)];
        // output node (id 2) has no outgoing or incoming edges at all.
        let g = CyclicGraph::build(&conns, 2, 1).unwrap();
        let info = analyze(&g).unwrap();
        assert_eq!(info.node_depth[2], 0);
    }
}
