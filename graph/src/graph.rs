//! Observable directed multigraph.

use crate::{Adjacency, GraphError, GraphEvent, GraphNode, GraphObserver, GraphResult};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Weak;
use tracing::trace;
use trellis_core::{ObserverId, ObserverList};

/// A mutable directed multigraph that publishes its changes.
///
/// Observers are held weakly and notified in registration order, after the
/// change has been applied.
#[derive(Debug)]
pub struct Graph<N: GraphNode> {
    adjacency: Adjacency<N>,
    observers: ObserverList<dyn GraphObserver<N>>,
}

impl<N: GraphNode> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> Graph<N> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::from_adjacency(Adjacency::new())
    }

    fn from_adjacency(adjacency: Adjacency<N>) -> Self {
        Self {
            adjacency,
            observers: ObserverList::new(),
        }
    }

    /// Read-only view of the current nodes and edges.
    pub fn adjacency(&self) -> &Adjacency<N> {
        &self.adjacency
    }

    fn publish(&mut self, event: GraphEvent<N>) {
        trace!(?event, "graph event");
        let adjacency = &self.adjacency;
        self.observers
            .notify(|observer| observer.on_graph_event(adjacency, &event));
    }

    // ==================== Node Operations ====================

    /// Insert a node. Inserting a present node is a no-op and raises no event.
    pub fn insert_node(&mut self, node: N) {
        if self.adjacency.insert_node(node.clone()) {
            self.publish(GraphEvent::NodeInserted(node));
        }
    }

    /// Delete a node, first deleting every incident edge occurrence.
    ///
    /// Deleting an absent node is a no-op.
    pub fn delete_node(&mut self, node: &N) {
        if !self.adjacency.contains_node(node) {
            return;
        }
        for (source, target) in self.adjacency.incident_edges(node) {
            if self.adjacency.remove_edge(&source, &target) {
                self.publish(GraphEvent::EdgeDeleted { source, target });
            }
        }
        self.adjacency.remove_node(node);
        self.publish(GraphEvent::NodeDeleted(node.clone()));
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_node(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adjacency.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    // ==================== Edge Operations ====================

    /// Insert one occurrence of `source -> target`. Both endpoints must exist.
    pub fn insert_edge(&mut self, source: N, target: N) -> GraphResult<()> {
        if !self.adjacency.contains_node(&source) {
            return Err(GraphError::node_not_found(&source));
        }
        if !self.adjacency.contains_node(&target) {
            return Err(GraphError::node_not_found(&target));
        }
        self.adjacency.insert_edge(source.clone(), target.clone());
        self.publish(GraphEvent::EdgeInserted { source, target });
        Ok(())
    }

    /// Delete one occurrence of `source -> target` if present.
    ///
    /// Returns whether an occurrence was removed.
    pub fn delete_edge_if_exists(&mut self, source: &N, target: &N) -> bool {
        if !self.adjacency.remove_edge(source, target) {
            return false;
        }
        self.publish(GraphEvent::EdgeDeleted {
            source: source.clone(),
            target: target.clone(),
        });
        true
    }

    /// Delete one occurrence of `source -> target`, which must exist.
    pub fn delete_edge_that_exists(&mut self, source: &N, target: &N) -> GraphResult<()> {
        if self.delete_edge_if_exists(source, target) {
            Ok(())
        } else {
            Err(GraphError::edge_not_found(source, target))
        }
    }

    /// Number of edge occurrences, counting multiplicity.
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    pub fn edge_multiplicity(&self, source: &N, target: &N) -> usize {
        self.adjacency.multiplicity(source, target)
    }

    pub fn targets<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.adjacency.targets(node)
    }

    pub fn sources<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.adjacency.sources(node)
    }

    // ==================== Observers ====================

    /// Register an observer at the end of the delivery order.
    pub fn attach_observer(&mut self, observer: Weak<RefCell<dyn GraphObserver<N>>>) -> ObserverId {
        self.observers.attach(observer)
    }

    /// Register an observer ahead of every other observer.
    pub fn attach_first_observer(
        &mut self,
        observer: Weak<RefCell<dyn GraphObserver<N>>>,
    ) -> ObserverId {
        self.observers.attach_first(observer)
    }

    pub fn detach_observer(&mut self, id: ObserverId) -> bool {
        self.observers.detach(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ==================== Sub-graphs ====================

    /// A new, unobserved graph with the given nodes and the edges between them.
    pub fn induced_subgraph(&self, nodes: &HashSet<N>) -> Graph<N> {
        Self::from_adjacency(self.adjacency.induced(nodes))
    }
}
