//! Materialized `(node, representative)` relation fed by a maintainer.

use crate::{ConnectivityMaintainer, RepresentativeObserver};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};
use trellis_core::Direction;
use trellis_graph::GraphNode;

/// Downstream index of component membership.
///
/// It applies representative changes with a plain delete/insert protocol,
/// without knowing whether they come from a merge, a split or a node change.
#[derive(Debug)]
pub struct RepresentativeRelation<N: GraphNode> {
    by_node: HashMap<N, N>,
    by_representative: HashMap<N, HashSet<N>>,
}

impl<N: GraphNode> RepresentativeRelation<N> {
    /// Seed from the current partition of `maintainer` and subscribe to it.
    pub fn attach<M>(maintainer: &mut M) -> Rc<RefCell<Self>>
    where
        M: ConnectivityMaintainer<N> + ?Sized,
    {
        let mut relation = Self {
            by_node: HashMap::new(),
            by_representative: HashMap::new(),
        };
        for (node, representative) in maintainer.partition().pairs() {
            relation.insert(node.clone(), representative.clone());
        }
        let relation = Rc::new(RefCell::new(relation));
        let observer = Rc::downgrade(&relation) as Weak<RefCell<dyn RepresentativeObserver<N>>>;
        maintainer.attach_observer(observer);
        relation
    }

    fn insert(&mut self, node: N, representative: N) {
        self.by_representative
            .entry(representative.clone())
            .or_default()
            .insert(node.clone());
        self.by_node.insert(node, representative);
    }

    fn delete(&mut self, node: &N, representative: &N) {
        if self.by_node.get(node) == Some(representative) {
            self.by_node.remove(node);
        }
        if let Some(members) = self.by_representative.get_mut(representative) {
            members.remove(node);
            if members.is_empty() {
                self.by_representative.remove(representative);
            }
        }
    }

    pub fn representative(&self, node: &N) -> Option<&N> {
        self.by_node.get(node)
    }

    pub fn members(&self, representative: &N) -> impl Iterator<Item = &N> + '_ {
        self.by_representative
            .get(representative)
            .into_iter()
            .flat_map(|members| members.iter())
    }

    pub fn contains(&self, node: &N, representative: &N) -> bool {
        self.by_node.get(node) == Some(representative)
    }

    /// Every materialized `(node, representative)` pair.
    pub fn tuples(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.by_node.iter()
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

impl<N: GraphNode> RepresentativeObserver<N> for RepresentativeRelation<N> {
    fn representative_changed(&mut self, node: &N, representative: &N, direction: Direction) {
        match direction {
            Direction::Insert => self.insert(node.clone(), representative.clone()),
            Direction::Delete => self.delete(node, representative),
        }
    }
}
