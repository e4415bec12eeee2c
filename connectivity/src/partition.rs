//! Component partition with representative election.
//!
//! The partition maps every tracked node to the representative of its
//! component and every representative to its member set. Any change of a
//! node's representative is announced to observers as a delete of the old
//! pair followed by an insert of the new one.

use crate::{ConnectivityError, ConnectivityResult};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Weak;
use tracing::debug;
use trellis_core::{Direction, ObserverId, ObserverList};
use trellis_graph::GraphNode;

/// Receives `(node, representative)` changes.
pub trait RepresentativeObserver<N: GraphNode> {
    fn representative_changed(&mut self, node: &N, representative: &N, direction: Direction);
}

/// Node -> representative and representative -> members.
#[derive(Debug)]
pub struct Partition<N: GraphNode> {
    representatives: HashMap<N, N>,
    components: HashMap<N, HashSet<N>>,
    observers: ObserverList<dyn RepresentativeObserver<N>>,
}

impl<N: GraphNode> Default for Partition<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> Partition<N> {
    pub fn new() -> Self {
        Self {
            representatives: HashMap::new(),
            components: HashMap::new(),
            observers: ObserverList::new(),
        }
    }

    // ==================== Queries ====================

    /// Representative of a tracked node.
    ///
    /// # Panics
    /// If the node is not tracked.
    pub fn representative(&self, node: &N) -> &N {
        self.representatives
            .get(node)
            .unwrap_or_else(|| panic!("{}", ConnectivityError::untracked(node)))
    }

    pub fn try_representative(&self, node: &N) -> Option<&N> {
        self.representatives.get(node)
    }

    /// Members of the component represented by `representative`.
    pub fn component(&self, representative: &N) -> Option<&HashSet<N>> {
        self.components.get(representative)
    }

    /// Members of the component containing `node`.
    ///
    /// # Panics
    /// If the node is not tracked.
    pub fn component_of(&self, node: &N) -> &HashSet<N> {
        let representative = self.representative(node);
        &self.components[representative]
    }

    pub fn components(&self) -> impl Iterator<Item = (&N, &HashSet<N>)> + '_ {
        self.components.iter()
    }

    pub fn same_component(&self, a: &N, b: &N) -> bool {
        match (self.representatives.get(a), self.representatives.get(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    pub fn contains(&self, node: &N) -> bool {
        self.representatives.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.representatives.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Every `(node, representative)` pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.representatives.iter()
    }

    /// Components as ordered sets, in ascending order. Used for comparisons.
    pub fn component_sets(&self) -> Vec<BTreeSet<N>> {
        let mut sets: Vec<BTreeSet<N>> = self
            .components
            .values()
            .map(|members| members.iter().cloned().collect())
            .collect();
        sets.sort();
        sets
    }

    // ==================== Observers ====================

    pub fn attach_observer(
        &mut self,
        observer: Weak<RefCell<dyn RepresentativeObserver<N>>>,
    ) -> ObserverId {
        self.observers.attach(observer)
    }

    pub fn attach_first_observer(
        &mut self,
        observer: Weak<RefCell<dyn RepresentativeObserver<N>>>,
    ) -> ObserverId {
        self.observers.attach_first(observer)
    }

    pub fn detach_observer(&mut self, id: ObserverId) -> bool {
        self.observers.detach(id)
    }

    fn announce(&mut self, node: &N, representative: &N, direction: Direction) {
        self.observers
            .notify(|observer| observer.representative_changed(node, representative, direction));
    }

    fn reassign(&mut self, node: &N, old: &N, new: &N) {
        self.representatives.insert(node.clone(), new.clone());
        self.announce(node, old, Direction::Delete);
        self.announce(node, new, Direction::Insert);
    }

    // ==================== Seeding ====================

    /// Record a component found by batch computation, electing its minimum
    /// member. Nothing is announced.
    ///
    /// # Panics
    /// If a member is already represented by a different representative.
    pub fn initialize_set(&mut self, members: impl IntoIterator<Item = N>) {
        let members: HashSet<N> = members.into_iter().collect();
        let Some(representative) = members.iter().min().cloned() else {
            return;
        };
        for node in &members {
            if let Some(existing) = self.representatives.get(node) {
                if *existing != representative {
                    panic!(
                        "node {:?} already represented by {:?}, cannot initialize with {:?}",
                        node, existing, representative
                    );
                }
            }
            self.representatives
                .insert(node.clone(), representative.clone());
        }
        self.components
            .entry(representative)
            .or_default()
            .extend(members);
    }

    // ==================== Singletons ====================

    /// Track a new node as its own component and announce `Insert(n, n)`.
    ///
    /// # Panics
    /// If the node is already tracked.
    pub fn insert_singleton(&mut self, node: N) {
        if let Some(existing) = self.representatives.get(&node) {
            panic!("node {:?} already tracked with representative {:?}", node, existing);
        }
        self.representatives.insert(node.clone(), node.clone());
        self.components
            .insert(node.clone(), HashSet::from([node.clone()]));
        self.announce(&node, &node, Direction::Insert);
    }

    /// Stop tracking an isolated node and announce `Delete(n, n)`.
    ///
    /// # Panics
    /// Unless the node is a singleton representing itself.
    pub fn remove_singleton(&mut self, node: &N) {
        let representative = self.representative(node).clone();
        let members = &self.components[&representative];
        if representative != *node || members.len() != 1 {
            panic!(
                "cannot delete non-isolated node {:?} (component of {:?} has {} members)",
                node,
                representative,
                members.len()
            );
        }
        self.representatives.remove(node);
        self.components.remove(node);
        self.announce(node, node, Direction::Delete);
    }

    // ==================== Merging ====================

    /// Merge every component touched by `nodes` into one.
    ///
    /// The largest touched component keeps its representative; only nodes
    /// whose representative changes are announced. Returns the surviving
    /// representative, or `None` if `nodes` is empty.
    pub fn merge_set(&mut self, nodes: &HashSet<N>) -> Option<N> {
        let mut touched: Vec<N> = nodes
            .iter()
            .map(|node| self.representative(node).clone())
            .collect::<BTreeSet<N>>()
            .into_iter()
            .collect();
        if touched.len() <= 1 {
            return touched.pop();
        }

        // Largest component wins; the smallest representative breaks ties.
        let best = touched
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| {
                self.components[*a]
                    .len()
                    .cmp(&self.components[*b].len())
                    .then(ib.cmp(ia))
            })
            .map(|(_, rep)| rep.clone())?;

        debug!(
            representative = ?best,
            components = touched.len(),
            "merging components"
        );
        for old in touched.iter().filter(|rep| **rep != best) {
            self.absorb(&best, old);
        }
        Some(best)
    }

    /// Weighted union of two components given by their representatives.
    ///
    /// The larger component keeps its representative; ties keep `left`.
    /// Returns the surviving representative.
    pub fn merge_pair(&mut self, left: &N, right: &N) -> N {
        let left = self.representative(left).clone();
        let right = self.representative(right).clone();
        if left == right {
            return left;
        }
        let (winner, loser) = if self.components[&right].len() > self.components[&left].len() {
            (right, left)
        } else {
            (left, right)
        };
        debug!(representative = ?winner, absorbed = ?loser, "merging components");
        self.absorb(&winner, &loser);
        winner
    }

    fn absorb(&mut self, winner: &N, loser: &N) {
        let Some(members) = self.components.remove(loser) else {
            return;
        };
        for member in &members {
            self.reassign(member, loser, winner);
        }
        self.components
            .entry(winner.clone())
            .or_default()
            .extend(members);
    }

    // ==================== Splitting ====================

    /// Replace the component of `representative` by the given parts.
    ///
    /// The parts must partition the component exactly. The part containing
    /// the old representative keeps it; every other part elects its minimum
    /// member as a fresh representative. Empty parts are ignored.
    ///
    /// # Panics
    /// If the parts do not cover the component exactly.
    pub fn split_component(&mut self, representative: &N, parts: Vec<HashSet<N>>) {
        let parts: Vec<HashSet<N>> = parts.into_iter().filter(|p| !p.is_empty()).collect();
        if parts.len() <= 1 {
            return;
        }
        let Some(component) = self.components.get(representative) else {
            panic!("{:?} is not a representative", representative);
        };
        let covered: usize = parts.iter().map(HashSet::len).sum();
        if covered != component.len() || !parts.iter().flatten().all(|n| component.contains(n)) {
            panic!(
                "split parts do not partition the component of {:?}",
                representative
            );
        }

        debug!(representative = ?representative, parts = parts.len(), "splitting component");
        for part in parts {
            if !part.contains(representative) {
                self.assign_new_representative(representative, part);
            }
        }
    }

    /// Move `part` out of the component of `old` under a freshly elected
    /// representative (its minimum member). Returns the new representative.
    pub fn assign_new_representative(&mut self, old: &N, part: HashSet<N>) -> Option<N> {
        let fresh = part.iter().min().cloned()?;
        if let Some(remaining) = self.components.get_mut(old) {
            for node in &part {
                remaining.remove(node);
            }
        }
        for node in &part {
            self.reassign(node, old, &fresh);
        }
        self.components.insert(fresh.clone(), part);
        Some(fresh)
    }

    // ==================== Validation ====================

    /// Check that the partition exactly covers `nodes` and is self-consistent.
    pub fn validate(&self, nodes: &HashSet<N>) -> ConnectivityResult<()> {
        for node in nodes {
            let representative = self
                .representatives
                .get(node)
                .ok_or_else(|| ConnectivityError::untracked(node))?;
            let in_members = self
                .components
                .get(representative)
                .map_or(false, |members| members.contains(node));
            if !in_members {
                return Err(ConnectivityError::member_mismatch(node, representative));
            }
        }
        if let Some(stale) = self.representatives.keys().find(|n| !nodes.contains(*n)) {
            return Err(ConnectivityError::stale(stale));
        }
        for (representative, members) in &self.components {
            if !members.contains(representative)
                || self.representatives.get(representative) != Some(representative)
            {
                return Err(ConnectivityError::representative_not_member(representative));
            }
        }
        let members: usize = self.components.values().map(HashSet::len).sum();
        if members != self.representatives.len() {
            return Err(ConnectivityError::component_mismatch(format!(
                "{} members listed for {} tracked nodes",
                members,
                self.representatives.len()
            )));
        }
        Ok(())
    }
}
