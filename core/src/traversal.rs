use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use crate::graph::{NodeId, SparseGraph};
use crate::observer::{BfsReport, Observer};

/// BFS over out-edges, returning each reached node with its hop distance.
///
/// Nodes come out in layer order, each exactly once. A node is marked
/// visited when it is enqueued, so the first (shallowest) discovery wins.
/// Neighbors are only enqueued while `depth < max_depth`.
///
/// A negative `max_depth` yields an empty result. A `start` with no row
/// in the graph is still reported at distance 0; it just has nothing to
/// expand.
pub fn bfs_layers(graph: &SparseGraph, start: NodeId, max_depth: i64) -> Vec<(NodeId, u32)> {
    if max_depth < 0 {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();

    visited.insert(start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if i64::from(depth) > max_depth {
            break;
        }
        result.push((current, depth));

        if i64::from(depth) >= max_depth {
            continue;
        }
        for &next in graph.neighbors(current) {
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    result
}

/// Nodes reachable from `start` within `max_depth` hops, in BFS order.
pub fn bounded_bfs(graph: &SparseGraph, start: NodeId, max_depth: i64) -> Vec<NodeId> {
    bfs_layers(graph, start, max_depth)
        .into_iter()
        .map(|(node, _)| node)
        .collect()
}

/// [`bounded_bfs`] with timing reported to `observer`.
pub fn bounded_bfs_observed(
    graph: &SparseGraph,
    start: NodeId,
    max_depth: i64,
    observer: &dyn Observer,
) -> Vec<NodeId> {
    let t = Instant::now();
    let nodes = bounded_bfs(graph, start, max_depth);
    observer.bfs_finished(&BfsReport {
        start,
        max_depth,
        visited: nodes.len(),
        elapsed: t.elapsed(),
    });
    nodes
}

/// Edges of the subgraph induced by `nodes`.
///
/// For each node in the given order, emits every out-edge whose target is
/// also in `nodes`, in CSR order with duplicates kept.
pub fn induced_edges(graph: &SparseGraph, nodes: &[NodeId]) -> Vec<(NodeId, NodeId)> {
    let members: HashSet<NodeId> = nodes.iter().copied().collect();
    let mut edges = Vec::new();
    for &from in nodes {
        for &to in graph.neighbors(from) {
            if members.contains(&to) {
                edges.push((from, to));
            }
        }
    }
    edges
}
