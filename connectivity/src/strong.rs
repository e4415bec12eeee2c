//! Incremental strongly connected components.

use crate::scc::strongly_connected_components;
use crate::{
    ConnectivityError, ConnectivityKind, ConnectivityMaintainer, ConnectivityResult, Partition,
    ReducedGraph,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace};
use trellis_core::ObserverId;
use trellis_graph::{traverse, Adjacency, Graph, GraphEvent, GraphNode, GraphObserver};

/// Maintains the strongly connected components of an observed graph,
/// together with their condensation.
///
/// An inserted edge merges components only when it closes a cycle; a deleted
/// internal edge splits its component when the source no longer reaches the
/// target inside it. Cycle detection and reachability queries walk the
/// condensation rather than the graph itself.
#[derive(Debug)]
pub struct StronglyConnected<N: GraphNode> {
    partition: Partition<N>,
    reduced: ReducedGraph<N>,
    validation: bool,
    registration: Option<ObserverId>,
}

impl<N: GraphNode> StronglyConnected<N> {
    /// Seed the partition from the current graph with a batch Tarjan pass.
    pub fn seeded(graph: &Adjacency<N>) -> Self {
        let mut partition = Partition::new();
        for component in strongly_connected_components(graph) {
            partition.initialize_set(component);
        }
        let reduced = ReducedGraph::condense(graph, &partition);
        Self {
            partition,
            reduced,
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

    pub fn reduced(&self) -> &ReducedGraph<N> {
        &self.reduced
    }

    /// Whether the component of `representative` contains a cycle, so that
    /// each member reaches itself.
    fn is_cyclic(&self, graph: &Adjacency<N>, representative: &N) -> bool {
        self.partition
            .component(representative)
            .map_or(false, |members| members.len() > 1)
            || graph.contains_edge(representative, representative)
    }

    /// Whether `target` is reachable from `source` in one or more steps.
    ///
    /// Untracked nodes reach nothing.
    pub fn reaches(&self, graph: &Adjacency<N>, source: &N, target: &N) -> bool {
        let (Some(from), Some(to)) = (
            self.partition.try_representative(source),
            self.partition.try_representative(target),
        ) else {
            return false;
        };
        if from == to {
            return source != target || self.is_cyclic(graph, from);
        }
        traverse::is_reachable(self.reduced.adjacency(), from, to, None)
    }

    /// Nodes reachable from `source` in one or more steps, sorted.
    pub fn reachable_targets(&self, graph: &Adjacency<N>, source: &N) -> Vec<N> {
        match self.partition.try_representative(source) {
            Some(own) => self.expand(graph, own, self.reduced.descendants(own)),
            None => Vec::new(),
        }
    }

    /// Nodes reaching `target` in one or more steps, sorted.
    pub fn reachable_sources(&self, graph: &Adjacency<N>, target: &N) -> Vec<N> {
        match self.partition.try_representative(target) {
            Some(own) => self.expand(graph, own, self.reduced.ancestors(own)),
            None => Vec::new(),
        }
    }

    /// Members of the components in `representatives`. The own component
    /// counts only if it is cyclic.
    fn expand(&self, graph: &Adjacency<N>, own: &N, mut representatives: HashSet<N>) -> Vec<N> {
        if !self.is_cyclic(graph, own) {
            representatives.remove(own);
        }
        let mut nodes: Vec<N> = representatives
            .iter()
            .filter_map(|rep| self.partition.component(rep))
            .flatten()
            .cloned()
            .collect();
        nodes.sort();
        nodes
    }

    /// Compare the condensation with a batch rebuild from `graph`.
    pub fn validate_reduced(&self, graph: &Adjacency<N>) -> ConnectivityResult<()> {
        let expected = ReducedGraph::condense(graph, &self.partition);
        if expected.adjacency() != self.reduced.adjacency() {
            return Err(ConnectivityError::component_mismatch(format!(
                "condensation expected {:?}, found {:?}",
                expected.adjacency(),
                self.reduced.adjacency()
            )));
        }
        Ok(())
    }

    fn edge_inserted(&mut self, graph: &Adjacency<N>, source: &N, target: &N) {
        let from = self.partition.representative(source).clone();
        let to = self.partition.representative(target).clone();
        if from == to {
            return;
        }
        // Every component on a path from `to` back to `from` is a descendant
        // of `to`, so the backward search can stay inside that set.
        let descendants = self.reduced.descendants(&to);
        if !descendants.contains(&from) {
            self.reduced.connect(&from, &to);
            return;
        }
        let on_cycle = traverse::backward_reachable(self.reduced.adjacency(), &from, Some(&descendants));
        let members: HashSet<N> = on_cycle
            .iter()
            .filter_map(|rep| self.partition.component(rep))
            .flatten()
            .cloned()
            .collect();
        debug!(?source, ?target, components = on_cycle.len(), "edge closes a cycle");
        self.partition.merge_set(&members);
        self.reduced.rebuild(graph, &self.partition, &on_cycle, &members);
    }

    fn edge_deleted(&mut self, graph: &Adjacency<N>, source: &N, target: &N) {
        let from = self.partition.representative(source).clone();
        let to = self.partition.representative(target).clone();
        if from != to {
            self.reduced.disconnect(&from, &to);
            return;
        }
        if source == target {
            return;
        }
        let component: HashSet<N> = self.partition.component_of(source).clone();
        if traverse::is_reachable(graph, source, target, Some(&component)) {
            return;
        }
        let parts = strongly_connected_components(&graph.induced(&component));
        debug!(?source, ?target, parts = parts.len(), "edge deletion breaks a cycle");
        self.partition.split_component(&from, parts);
        self.reduced
            .rebuild(graph, &self.partition, &HashSet::from([from]), &component);
    }
}

impl<N: GraphNode> GraphObserver<N> for StronglyConnected<N> {
    fn on_graph_event(&mut self, graph: &Adjacency<N>, event: &GraphEvent<N>) {
        trace!(?event, "strong connectivity update");
        match event {
            GraphEvent::NodeInserted(node) => {
                self.partition.insert_singleton(node.clone());
                self.reduced.insert_component(node.clone());
            }
            GraphEvent::NodeDeleted(node) => {
                self.partition.remove_singleton(node);
                self.reduced.remove_component(node);
            }
            GraphEvent::EdgeInserted { source, target } => {
                self.edge_inserted(graph, source, target)
            }
            GraphEvent::EdgeDeleted { source, target } => self.edge_deleted(graph, source, target),
        }
        if self.validation {
            if let Err(error) = self
                .validate_against(graph)
                .and_then(|()| self.validate_reduced(graph))
            {
                panic!("inconsistent strong partition after {:?}: {}", event, error);
            }
        }
    }
}

impl<N: GraphNode> ConnectivityMaintainer<N> for StronglyConnected<N> {
    fn kind(&self) -> ConnectivityKind {
        ConnectivityKind::Strong
    }

    fn partition(&self) -> &Partition<N> {
        &self.partition
    }

    fn partition_mut(&mut self) -> &mut Partition<N> {
        &mut self.partition
    }

    fn recompute(&self, graph: &Adjacency<N>) -> Vec<HashSet<N>> {
        strongly_connected_components(graph)
    }

    fn registration(&mut self) -> &mut Option<ObserverId> {
        &mut self.registration
    }
}
