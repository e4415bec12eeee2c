//! Incremental weakly connected components.

use crate::scc::weakly_connected_components;
use crate::{ConnectivityKind, ConnectivityMaintainer, Partition};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace};
use trellis_core::ObserverId;
use trellis_graph::{traverse, Adjacency, Graph, GraphEvent, GraphNode, GraphObserver};

/// Maintains the weakly connected components of an observed graph.
#[derive(Debug)]
pub struct WeaklyConnected<N: GraphNode> {
    partition: Partition<N>,
    validation: bool,
    registration: Option<ObserverId>,
}

impl<N: GraphNode> WeaklyConnected<N> {
    /// Seed the partition from the current graph by breadth-first flooding.
    pub fn seeded(graph: &Adjacency<N>) -> Self {
        let mut partition = Partition::new();
        for component in weakly_connected_components(graph) {
            partition.initialize_set(component);
        }
        Self {
            partition,
            validation: false,
            registration: None,
        }
    }

    /// Re-validate the partition against a batch recomputation after every event.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validation = enabled;
        self
    }

    /// Seed from `graph` and attach as its first observer.
    pub fn attach(graph: &mut Graph<N>) -> Rc<RefCell<Self>> {
        Self::seeded(graph.adjacency()).register(graph)
    }

    pub fn is_validating(&self) -> bool {
        self.validation
    }

    fn edge_deleted(&mut self, graph: &Adjacency<N>, source: &N, target: &N) {
        if source == target || graph.contains_edge(source, target) || graph.contains_edge(target, source) {
            return;
        }
        let representative = self.partition.representative(source).clone();
        let component: HashSet<N> = self.partition.component_of(source).clone();
        let reached = traverse::undirected_reachable(graph, target, Some(&component));
        if reached.contains(source) {
            return;
        }
        let rest: HashSet<N> = component.difference(&reached).cloned().collect();
        debug!(?source, ?target, "edge deletion disconnects component");
        self.partition
            .split_component(&representative, vec![reached, rest]);
    }
}

impl<N: GraphNode> GraphObserver<N> for WeaklyConnected<N> {
    fn on_graph_event(&mut self, graph: &Adjacency<N>, event: &GraphEvent<N>) {
        trace!(?event, "weak connectivity update");
        match event {
            GraphEvent::NodeInserted(node) => self.partition.insert_singleton(node.clone()),
            GraphEvent::NodeDeleted(node) => self.partition.remove_singleton(node),
            GraphEvent::EdgeInserted { source, target } => {
                self.partition.merge_pair(source, target);
            }
            GraphEvent::EdgeDeleted { source, target } => self.edge_deleted(graph, source, target),
        }
        if self.validation {
            if let Err(error) = self.validate_against(graph) {
                panic!("inconsistent weak partition after {:?}: {}", event, error);
            }
        }
    }
}

impl<N: GraphNode> ConnectivityMaintainer<N> for WeaklyConnected<N> {
    fn kind(&self) -> ConnectivityKind {
        ConnectivityKind::Weak
    }

    fn partition(&self) -> &Partition<N> {
        &self.partition
    }

    fn partition_mut(&mut self) -> &mut Partition<N> {
        &mut self.partition
    }

    fn recompute(&self, graph: &Adjacency<N>) -> Vec<HashSet<N>> {
        weakly_connected_components(graph)
    }

    fn registration(&mut self) -> &mut Option<ObserverId> {
        &mut self.registration
    }
}
