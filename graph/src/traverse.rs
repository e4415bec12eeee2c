//! Breadth-first traversals over an adjacency.
//!
//! Every traversal may be restricted to a node subset; nodes outside it are
//! neither visited nor crossed. Reachable sets include the start node.

use crate::{Adjacency, GraphNode};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Forward,
    Backward,
    Undirected,
}

fn flood<N: GraphNode>(
    graph: &Adjacency<N>,
    start: &N,
    within: Option<&HashSet<N>>,
    walk: Walk,
    stop_at: Option<&N>,
) -> HashSet<N> {
    let allowed = |n: &N| within.map_or(true, |set| set.contains(n));
    let mut seen = HashSet::new();
    if !graph.contains_node(start) || !allowed(start) {
        return seen;
    }
    let mut queue = VecDeque::new();
    seen.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(node) = queue.pop_front() {
        if stop_at == Some(&node) {
            break;
        }
        let forward = matches!(walk, Walk::Forward | Walk::Undirected)
            .then(|| graph.targets(&node))
            .into_iter()
            .flatten();
        let backward = matches!(walk, Walk::Backward | Walk::Undirected)
            .then(|| graph.sources(&node))
            .into_iter()
            .flatten();
        for next in forward.chain(backward) {
            if allowed(next) && seen.insert(next.clone()) {
                queue.push_back(next.clone());
            }
        }
    }
    seen
}

/// Nodes reachable from `start` following edge direction.
pub fn forward_reachable<N: GraphNode>(
    graph: &Adjacency<N>,
    start: &N,
    within: Option<&HashSet<N>>,
) -> HashSet<N> {
    flood(graph, start, within, Walk::Forward, None)
}

/// Nodes from which `start` is reachable.
pub fn backward_reachable<N: GraphNode>(
    graph: &Adjacency<N>,
    start: &N,
    within: Option<&HashSet<N>>,
) -> HashSet<N> {
    flood(graph, start, within, Walk::Backward, None)
}

/// Nodes connected to `start` ignoring edge direction.
pub fn undirected_reachable<N: GraphNode>(
    graph: &Adjacency<N>,
    start: &N,
    within: Option<&HashSet<N>>,
) -> HashSet<N> {
    flood(graph, start, within, Walk::Undirected, None)
}

/// Whether `target` is reachable from `source` in zero or more steps.
pub fn is_reachable<N: GraphNode>(
    graph: &Adjacency<N>,
    source: &N,
    target: &N,
    within: Option<&HashSet<N>>,
) -> bool {
    flood(graph, source, within, Walk::Forward, Some(target)).contains(target)
}

/// Whether `a` and `b` are connected ignoring edge direction.
pub fn is_connected<N: GraphNode>(
    graph: &Adjacency<N>,
    a: &N,
    b: &N,
    within: Option<&HashSet<N>>,
) -> bool {
    flood(graph, a, within, Walk::Undirected, Some(b)).contains(b)
}
