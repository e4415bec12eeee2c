//! Graph change events and the observer interface.

use crate::{Adjacency, GraphNode};

/// A single change to a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent<N> {
    NodeInserted(N),
    NodeDeleted(N),
    EdgeInserted { source: N, target: N },
    EdgeDeleted { source: N, target: N },
}

impl<N> GraphEvent<N> {
    pub fn is_node_event(&self) -> bool {
        matches!(self, GraphEvent::NodeInserted(_) | GraphEvent::NodeDeleted(_))
    }
}

/// Receives graph changes in registration order.
///
/// The adjacency passed along reflects the graph after the change.
pub trait GraphObserver<N: GraphNode> {
    fn on_graph_event(&mut self, graph: &Adjacency<N>, event: &GraphEvent<N>);
}
