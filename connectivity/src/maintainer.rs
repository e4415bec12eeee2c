//! Shared interface of the connectivity maintainers.

use crate::{ConnectivityError, ConnectivityResult, Partition, RepresentativeObserver};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};
use trellis_core::ObserverId;
use trellis_graph::{Adjacency, Graph, GraphNode, GraphObserver};

/// Which connectivity notion a maintainer tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectivityKind {
    /// Mutual reachability respecting edge direction.
    Strong,
    /// Connectivity ignoring edge direction.
    Weak,
}

impl fmt::Display for ConnectivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityKind::Strong => write!(f, "strong"),
            ConnectivityKind::Weak => write!(f, "weak"),
        }
    }
}

/// A graph observer keeping a component partition up to date.
///
/// Maintainers register as the first observer of their graph so that the
/// partition is current before any other observer sees a change.
pub trait ConnectivityMaintainer<N: GraphNode>: GraphObserver<N> {
    fn kind(&self) -> ConnectivityKind;

    fn partition(&self) -> &Partition<N>;

    fn partition_mut(&mut self) -> &mut Partition<N>;

    /// Batch computation of the components of `graph`.
    fn recompute(&self, graph: &Adjacency<N>) -> Vec<HashSet<N>>;

    /// Graph registration handle, if attached.
    fn registration(&mut self) -> &mut Option<ObserverId>;

    /// # Panics
    /// If the node is not part of the observed graph.
    fn representative(&self, node: &N) -> &N {
        self.partition().representative(node)
    }

    fn try_representative(&self, node: &N) -> Option<&N> {
        self.partition().try_representative(node)
    }

    /// Members of the component represented by `representative`.
    fn component(&self, representative: &N) -> Option<&HashSet<N>> {
        self.partition().component(representative)
    }

    fn components(&self) -> Vec<(N, HashSet<N>)> {
        self.partition()
            .components()
            .map(|(rep, members)| (rep.clone(), members.clone()))
            .collect()
    }

    fn same_component(&self, a: &N, b: &N) -> bool {
        self.partition().same_component(a, b)
    }

    fn attach_observer(
        &mut self,
        observer: Weak<RefCell<dyn RepresentativeObserver<N>>>,
    ) -> ObserverId {
        self.partition_mut().attach_observer(observer)
    }

    fn attach_first_observer(
        &mut self,
        observer: Weak<RefCell<dyn RepresentativeObserver<N>>>,
    ) -> ObserverId {
        self.partition_mut().attach_first_observer(observer)
    }

    fn detach_observer(&mut self, id: ObserverId) -> bool {
        self.partition_mut().detach_observer(id)
    }

    /// Compare the partition with a batch recomputation over `graph`.
    fn validate_against(&self, graph: &Adjacency<N>) -> ConnectivityResult<()> {
        self.partition().validate(graph.node_set())?;
        let mut expected: Vec<_> = self
            .recompute(graph)
            .into_iter()
            .map(|component| component.into_iter().collect::<std::collections::BTreeSet<N>>())
            .collect();
        expected.sort();
        let actual = self.partition().component_sets();
        if actual != expected {
            return Err(ConnectivityError::component_mismatch(format!(
                "{} components expected {:?}, found {:?}",
                self.kind(),
                expected,
                actual
            )));
        }
        Ok(())
    }

    /// Register as the first observer of `graph`.
    fn register(self, graph: &mut Graph<N>) -> Rc<RefCell<Self>>
    where
        Self: Sized + 'static,
    {
        let maintainer = Rc::new(RefCell::new(self));
        let observer = Rc::downgrade(&maintainer) as Weak<RefCell<dyn GraphObserver<N>>>;
        let id = graph.attach_first_observer(observer);
        *maintainer.borrow_mut().registration() = Some(id);
        maintainer
    }

    /// Stop observing `graph`. Returns false if not attached.
    fn detach(&mut self, graph: &mut Graph<N>) -> bool {
        match self.registration().take() {
            Some(id) => graph.detach_observer(id),
            None => false,
        }
    }
}
