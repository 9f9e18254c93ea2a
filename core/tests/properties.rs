use std::collections::BTreeSet;

use proptest::prelude::*;
use sparsegraph_core::{bfs_layers, bounded_bfs, NodeId, SparseGraph};

/// Ids reachable from `start` in at most `depth` hops, by repeated
/// expansion over the raw edge list.
fn reachable_within(edges: &[(NodeId, NodeId)], start: NodeId, depth: i64) -> BTreeSet<NodeId> {
    let mut reached = BTreeSet::new();
    if depth < 0 {
        return reached;
    }
    reached.insert(start);
    let mut frontier = reached.clone();
    for _ in 0..depth {
        let next: BTreeSet<NodeId> = edges
            .iter()
            .filter(|(from, to)| frontier.contains(from) && !reached.contains(to))
            .map(|&(_, to)| to)
            .collect();
        if next.is_empty() {
            break;
        }
        reached.extend(next.iter().copied());
        frontier = next;
    }
    reached
}

fn edge_list() -> impl Strategy<Value = Vec<(NodeId, NodeId)>> {
    prop::collection::vec((0u32..64, 0u32..64), 0..200)
}

proptest! {
    #[test]
    fn degrees_sum_to_edge_count(edges in edge_list()) {
        let g = SparseGraph::from_edges(edges.clone());
        let max = g.max_node_id().unwrap_or(0);
        let total: usize = (0..=max).map(|i| g.degree(i)).sum();
        prop_assert_eq!(total, g.edge_count());
        prop_assert_eq!(g.edge_count(), edges.len());
    }

    #[test]
    fn neighbors_len_matches_degree(edges in edge_list()) {
        let g = SparseGraph::from_edges(edges);
        let max = g.max_node_id().unwrap_or(0);
        for i in 0..=max {
            prop_assert_eq!(g.neighbors(i).len(), g.degree(i));
        }
        prop_assert_eq!(g.degree(max + 1), 0);
        prop_assert!(g.neighbors(max + 1).is_empty());
    }

    #[test]
    fn csr_invariants_hold(edges in edge_list()) {
        let g = SparseGraph::from_edges(edges);
        prop_assert_eq!(g.row_ptr()[0], 0);
        prop_assert!(g.row_ptr().windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(g.validate().is_ok());
    }

    #[test]
    fn neighbors_preserve_insertion_order(edges in edge_list()) {
        let g = SparseGraph::from_edges(edges.clone());
        let max = g.max_node_id().unwrap_or(0);
        for i in 0..=max {
            let expected: Vec<NodeId> =
                edges.iter().filter(|e| e.0 == i).map(|e| e.1).collect();
            prop_assert_eq!(g.neighbors(i), expected.as_slice());
        }
    }

    #[test]
    fn node_count_is_distinct_ids(edges in edge_list()) {
        let g = SparseGraph::from_edges(edges.clone());
        let mut ids: Vec<NodeId> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(g.node_count(), ids.len());
    }

    #[test]
    fn bfs_visits_each_node_once_in_layer_order(
        edges in edge_list(),
        start in 0u32..70,
        depth in 0i64..8,
    ) {
        let g = SparseGraph::from_edges(edges);
        let layers = bfs_layers(&g, start, depth);
        prop_assert_eq!(layers[0], (start, 0));
        prop_assert!(layers.windows(2).all(|w| w[0].1 <= w[1].1));
        prop_assert!(layers.iter().all(|&(_, d)| i64::from(d) <= depth));

        let mut nodes = bounded_bfs(&g, start, depth);
        let len = nodes.len();
        nodes.sort_unstable();
        nodes.dedup();
        prop_assert_eq!(nodes.len(), len);
    }

    #[test]
    fn bfs_reaches_exactly_the_nodes_within_depth(
        edges in edge_list(),
        start in 0u32..70,
        depth in -2i64..8,
    ) {
        let g = SparseGraph::from_edges(edges.clone());
        let found: BTreeSet<NodeId> = bounded_bfs(&g, start, depth).into_iter().collect();
        prop_assert_eq!(found, reachable_within(&edges, start, depth));
    }

    #[test]
    fn max_degree_node_is_lowest_maximum(edges in edge_list()) {
        let g = SparseGraph::from_edges(edges);
        let best = g.max_degree_node();
        let max = g.max_node_id().unwrap_or(0);
        for i in 0..=max {
            prop_assert!(g.degree(i) <= g.degree(best));
            if i < best {
                prop_assert!(g.degree(i) < g.degree(best));
            }
        }
    }
}
