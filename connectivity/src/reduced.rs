//! Condensation of a graph over its strong components.
//!
//! Each node of the reduced graph is a component representative; every
//! original edge between two different components contributes one
//! occurrence of the corresponding reduced edge. The reduced graph is
//! acyclic as long as the partition is the strong one.

use crate::Partition;
use std::collections::HashSet;
use trellis_graph::{traverse, Adjacency, GraphNode};

#[derive(Debug, Clone)]
pub struct ReducedGraph<N: GraphNode> {
    adjacency: Adjacency<N>,
}

impl<N: GraphNode> Default for ReducedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> ReducedGraph<N> {
    pub fn new() -> Self {
        Self {
            adjacency: Adjacency::new(),
        }
    }

    /// Batch construction from a graph and its partition.
    pub fn condense(graph: &Adjacency<N>, partition: &Partition<N>) -> Self {
        let mut reduced = Self::new();
        for node in graph.nodes() {
            reduced.adjacency.insert_node(partition.representative(node).clone());
        }
        for (source, target, count) in graph.edges() {
            let from = partition.representative(source);
            let to = partition.representative(target);
            if from != to {
                reduced.connect_many(from, to, count);
            }
        }
        reduced
    }

    pub fn adjacency(&self) -> &Adjacency<N> {
        &self.adjacency
    }

    pub fn insert_component(&mut self, representative: N) {
        self.adjacency.insert_node(representative);
    }

    /// Drop a component node together with every reduced edge touching it.
    pub fn remove_component(&mut self, representative: &N) {
        for (source, target) in self.adjacency.incident_edges(representative) {
            self.adjacency.remove_edge(&source, &target);
        }
        self.adjacency.remove_node(representative);
    }

    /// Record one edge occurrence between two different components.
    pub fn connect(&mut self, from: &N, to: &N) {
        self.connect_many(from, to, 1);
    }

    /// Forget one edge occurrence between two different components.
    pub fn disconnect(&mut self, from: &N, to: &N) -> bool {
        self.adjacency.remove_edge(from, to)
    }

    fn connect_many(&mut self, from: &N, to: &N, count: usize) {
        for _ in 0..count {
            self.adjacency.insert_edge(from.clone(), to.clone());
        }
    }

    /// Replace the components in `stale` by the current components of `members`.
    ///
    /// `members` must be exactly the nodes formerly represented by `stale`.
    /// Only edges touching `members` are revisited.
    pub fn rebuild(
        &mut self,
        graph: &Adjacency<N>,
        partition: &Partition<N>,
        stale: &HashSet<N>,
        members: &HashSet<N>,
    ) {
        for representative in stale {
            self.remove_component(representative);
        }
        for member in members {
            let own = partition.representative(member);
            self.adjacency.insert_node(own.clone());
            for target in graph.targets(member) {
                let to = partition.representative(target);
                if to != own {
                    self.connect_many(own, to, graph.multiplicity(member, target));
                }
            }
            for source in graph.sources(member) {
                if members.contains(source) {
                    continue;
                }
                let from = partition.representative(source);
                self.connect_many(from, own, graph.multiplicity(source, member));
            }
        }
    }

    /// Representatives reachable from `representative`, itself included.
    pub fn descendants(&self, representative: &N) -> HashSet<N> {
        traverse::forward_reachable(&self.adjacency, representative, None)
    }

    /// Representatives reaching `representative`, itself included.
    pub fn ancestors(&self, representative: &N) -> HashSet<N> {
        traverse::backward_reachable(&self.adjacency, representative, None)
    }

    pub fn component_count(&self) -> usize {
        self.adjacency.node_count()
    }
}
