//! Node set and adjacency multisets.

use crate::GraphNode;
use std::collections::{HashMap, HashSet};

/// Occurrence counts of the edges leaving (or entering) one node.
type Multiset<N> = HashMap<N, usize>;

/// Node set plus mirrored outgoing/incoming multisets.
///
/// `outgoing[s][t]` and `incoming[t][s]` always hold the same multiplicity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency<N: GraphNode> {
    nodes: HashSet<N>,
    outgoing: HashMap<N, Multiset<N>>,
    incoming: HashMap<N, Multiset<N>>,
    edge_count: usize,
}

impl<N: GraphNode> Default for Adjacency<N> {
    fn default() -> Self {
        Self {
            nodes: HashSet::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            edge_count: 0,
        }
    }
}

impl<N: GraphNode> Adjacency<N> {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Nodes ====================

    /// Add a node. Returns false if it was already present.
    pub fn insert_node(&mut self, node: N) -> bool {
        self.nodes.insert(node)
    }

    /// Remove an isolated node. Returns false if it was absent.
    pub fn remove_node(&mut self, node: &N) -> bool {
        debug_assert!(!self.has_incident_edges(node));
        self.outgoing.remove(node);
        self.incoming.remove(node);
        self.nodes.remove(node)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    pub fn node_set(&self) -> &HashSet<N> {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== Edges ====================

    /// Add one occurrence of `source -> target`. Returns the new multiplicity.
    pub fn insert_edge(&mut self, source: N, target: N) -> usize {
        *self
            .incoming
            .entry(target.clone())
            .or_default()
            .entry(source.clone())
            .or_default() += 1;
        let count = self
            .outgoing
            .entry(source)
            .or_default()
            .entry(target)
            .or_default();
        *count += 1;
        self.edge_count += 1;
        *count
    }

    /// Remove one occurrence of `source -> target`. Returns false if absent.
    pub fn remove_edge(&mut self, source: &N, target: &N) -> bool {
        if !Self::decrement(&mut self.outgoing, source, target) {
            return false;
        }
        Self::decrement(&mut self.incoming, target, source);
        self.edge_count -= 1;
        true
    }

    fn decrement(index: &mut HashMap<N, Multiset<N>>, from: &N, to: &N) -> bool {
        let Some(set) = index.get_mut(from) else {
            return false;
        };
        let Some(count) = set.get_mut(to) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            set.remove(to);
            if set.is_empty() {
                index.remove(from);
            }
        }
        true
    }

    /// Number of occurrences of `source -> target`.
    pub fn multiplicity(&self, source: &N, target: &N) -> usize {
        self.outgoing
            .get(source)
            .and_then(|set| set.get(target))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains_edge(&self, source: &N, target: &N) -> bool {
        self.multiplicity(source, target) > 0
    }

    /// Total number of edge occurrences.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Distinct targets of edges leaving `node`.
    pub fn targets<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.outgoing
            .get(node)
            .into_iter()
            .flat_map(|set| set.keys())
    }

    /// Distinct sources of edges entering `node`.
    pub fn sources<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.incoming
            .get(node)
            .into_iter()
            .flat_map(|set| set.keys())
    }

    /// Every distinct edge with its multiplicity.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, usize)> + '_ {
        self.outgoing
            .iter()
            .flat_map(|(source, set)| set.iter().map(move |(target, count)| (source, target, *count)))
    }

    pub fn has_incident_edges(&self, node: &N) -> bool {
        self.outgoing.contains_key(node) || self.incoming.contains_key(node)
    }

    /// Edge occurrences touching `node`, each listed once (self-loops included once).
    pub fn incident_edges(&self, node: &N) -> Vec<(N, N)> {
        let mut edges = Vec::new();
        if let Some(set) = self.outgoing.get(node) {
            for (target, count) in set {
                edges.extend(std::iter::repeat((node.clone(), target.clone())).take(*count));
            }
        }
        if let Some(set) = self.incoming.get(node) {
            for (source, count) in set {
                if source != node {
                    edges.extend(std::iter::repeat((source.clone(), node.clone())).take(*count));
                }
            }
        }
        edges
    }

    /// Copy of the nodes in `keep` and every edge occurrence between them.
    pub fn induced(&self, keep: &HashSet<N>) -> Self {
        let mut sub = Self::new();
        for node in self.nodes.iter().filter(|n| keep.contains(*n)) {
            sub.insert_node(node.clone());
        }
        for (source, target, count) in self.edges() {
            if keep.contains(source) && keep.contains(target) {
                for _ in 0..count {
                    sub.insert_edge(source.clone(), target.clone());
                }
            }
        }
        sub
    }
}
