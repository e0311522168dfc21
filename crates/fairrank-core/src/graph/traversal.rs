//! Breadth-first traversals for hop queries and eccentricity.

use std::collections::{HashMap, VecDeque};

use petgraph::stable_graph::NodeIndex;

use crate::graph::Directedness;
use crate::graph::memory::MemoryGraph;

/// Unweighted shortest-path distances from `start` to every reachable node.
fn bfs_distances(
    graph: &MemoryGraph,
    start: NodeIndex,
    walk: Directedness,
    max_depth: Option<usize>,
) -> HashMap<NodeIndex, usize> {
    let mut dist: HashMap<NodeIndex, usize> = HashMap::new();
    dist.insert(start, 0);

    let mut queue: VecDeque<NodeIndex> = VecDeque::new();
    queue.push_back(start);

    while let Some(v) = queue.pop_front() {
        let dv = dist[&v];
        if max_depth.is_some_and(|limit| dv >= limit) {
            continue;
        }
        for w in graph.neighbor_indices(v, walk) {
            dist.entry(w).or_insert_with(|| {
                queue.push_back(w);
                dv + 1
            });
        }
    }

    dist
}

/// Nodes whose shortest distance from `start` is exactly `hops`.
pub(crate) fn nodes_at_distance(
    graph: &MemoryGraph,
    start: NodeIndex,
    hops: usize,
    walk: Directedness,
) -> Vec<NodeIndex> {
    bfs_distances(graph, start, walk, Some(hops))
        .into_iter()
        .filter_map(|(idx, d)| (d == hops).then_some(idx))
        .collect()
}

/// Greatest finite distance from `start`; 0 when nothing else is reachable.
pub(crate) fn eccentricity(graph: &MemoryGraph, start: NodeIndex, walk: Directedness) -> usize {
    bfs_distances(graph, start, walk, None)
        .into_values()
        .max()
        .unwrap_or(0)
}
