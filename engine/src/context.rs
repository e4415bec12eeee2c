//! Storage capabilities consumed by the engine.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use trellis_core::{RelationKey, Tuple, Value};

/// Lazy sequence of tuples produced by a search context.
pub type TupleIter<'c> = Box<dyn Iterator<Item = Tuple> + 'c>;

/// The relational storage a search runs against.
///
/// The engine depends only on these capabilities, never on how tuples are
/// stored. Reachability helpers default to breadth-first search over
/// `enumerate`; implementations may answer them from connectivity indexes.
pub trait SearchContext {
    /// Tuples of `key` agreeing with the partial binding `pattern`.
    fn enumerate<'c>(&'c self, key: &RelationKey, pattern: &[Option<Value>]) -> TupleIter<'c>;

    /// Membership of a fully bound tuple.
    fn contains(&self, key: &RelationKey, tuple: &Tuple) -> bool {
        let pattern: Vec<Option<Value>> = tuple.values().iter().cloned().map(Some).collect();
        self.enumerate(key, &pattern).next().is_some()
    }

    /// Number of tuples agreeing with `pattern`.
    fn count(&self, key: &RelationKey, pattern: &[Option<Value>]) -> usize {
        self.enumerate(key, pattern).count()
    }

    /// Whether `target` is reachable from `source` through the binary
    /// relation `key` in one or more steps.
    fn reaches(&self, key: &RelationKey, source: &Value, target: &Value) -> bool {
        self.reachable_targets(key, source).contains(target)
    }

    /// Values reachable from `source` in one or more steps, in breadth-first order.
    fn reachable_targets(&self, key: &RelationKey, source: &Value) -> Vec<Value> {
        breadth_first(source, |node| {
            self.enumerate(key, &[Some(node.clone()), None])
                .filter_map(|t| t.get(1).cloned())
                .collect()
        })
    }

    /// Values from which `target` is reachable in one or more steps.
    fn reachable_sources(&self, key: &RelationKey, target: &Value) -> Vec<Value> {
        breadth_first(target, |node| {
            self.enumerate(key, &[None, Some(node.clone())])
                .filter_map(|t| t.get(0).cloned())
                .collect()
        })
    }

    /// Distinct values appearing in any position of the binary relation `key`.
    fn domain(&self, key: &RelationKey) -> Vec<Value> {
        let values: BTreeSet<Value> = self
            .enumerate(key, &[None, None])
            .flat_map(Tuple::into_values)
            .collect();
        values.into_iter().collect()
    }
}

/// Values reachable from `start` in one or more steps of `step`.
///
/// `start` itself is included only if it lies on a cycle.
pub fn breadth_first(start: &Value, mut step: impl FnMut(&Value) -> Vec<Value>) -> Vec<Value> {
    let mut seen: HashSet<Value> = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start.clone()]);
    while let Some(node) = queue.pop_front() {
        for next in step(&node) {
            if seen.insert(next.clone()) {
                order.push(next.clone());
                queue.push_back(next);
            }
        }
    }
    order
}

/// A plain in-memory tuple store.
///
/// Tuples keep their insertion order; duplicates are ignored.
#[derive(Debug, Clone, Default)]
pub struct TupleStore {
    relations: HashMap<RelationKey, Vec<Tuple>>,
}

impl TupleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tuple. Returns false if it was already present.
    pub fn insert(&mut self, key: &RelationKey, tuple: Tuple) -> bool {
        let tuples = self.relations.entry(key.clone()).or_default();
        if tuples.contains(&tuple) {
            return false;
        }
        tuples.push(tuple);
        true
    }

    /// Chaining form of [`TupleStore::insert`].
    pub fn with(mut self, key: &RelationKey, tuple: Tuple) -> Self {
        self.insert(key, tuple);
        self
    }

    /// Remove a tuple. Returns false if it was absent.
    pub fn remove(&mut self, key: &RelationKey, tuple: &Tuple) -> bool {
        let Some(tuples) = self.relations.get_mut(key) else {
            return false;
        };
        let before = tuples.len();
        tuples.retain(|t| t != tuple);
        tuples.len() != before
    }

    pub fn len(&self, key: &RelationKey) -> usize {
        self.relations.get(key).map_or(0, Vec::len)
    }
}

impl SearchContext for TupleStore {
    fn enumerate<'c>(&'c self, key: &RelationKey, pattern: &[Option<Value>]) -> TupleIter<'c> {
        let pattern = pattern.to_vec();
        Box::new(
            self.relations
                .get(key)
                .into_iter()
                .flatten()
                .filter(move |tuple| tuple.matches(&pattern))
                .cloned(),
        )
    }

    fn contains(&self, key: &RelationKey, tuple: &Tuple) -> bool {
        self.relations
            .get(key)
            .map_or(false, |tuples| tuples.contains(tuple))
    }
}
