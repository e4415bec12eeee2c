//! In-memory relational model.
//!
//! Binary relations are stored as directed multigraphs with strong and weak
//! connectivity maintainers attached, so every binary relation `r` also
//! exposes the derived relations `r#scc` and `r#wcc` of
//! `(node, representative)` pairs. All other relations are plain tuple sets
//! that keep insertion order.

use crate::{SessionError, SessionResult};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;
use tracing::trace;
use trellis_config::EngineConfig;
use trellis_connectivity::{
    ConnectivityMaintainer, RepresentativeRelation, StronglyConnected, WeaklyConnected,
};
use trellis_core::{tuple, RelationKey, Tuple, Value};
use trellis_engine::{breadth_first, SearchContext, TupleIter};
use trellis_graph::{traverse, Graph};

/// A relation stored as a tuple set.
#[derive(Debug)]
struct TupleRelation {
    arity: usize,
    tuples: Vec<Tuple>,
    members: HashSet<Tuple>,
}

impl TupleRelation {
    fn new(arity: usize) -> Self {
        Self {
            arity,
            tuples: Vec::new(),
            members: HashSet::new(),
        }
    }

    fn insert(&mut self, tuple: Tuple) -> bool {
        if !self.members.insert(tuple.clone()) {
            return false;
        }
        self.tuples.push(tuple);
        true
    }

    fn remove(&mut self, tuple: &Tuple) -> bool {
        if !self.members.remove(tuple) {
            return false;
        }
        self.tuples.retain(|t| t != tuple);
        true
    }

    fn matching(&self, pattern: &[Option<Value>]) -> Vec<Tuple> {
        if pattern.iter().all(Option::is_some) {
            let bound = Tuple::new(pattern.iter().flatten().cloned().collect());
            return if self.members.contains(&bound) {
                vec![bound]
            } else {
                Vec::new()
            };
        }
        self.tuples
            .iter()
            .filter(|tuple| tuple.matches(pattern))
            .cloned()
            .collect()
    }
}

/// A binary relation stored as an observed graph.
struct GraphRelation {
    graph: Graph<Value>,
    strong: Rc<RefCell<StronglyConnected<Value>>>,
    weak: Rc<RefCell<WeaklyConnected<Value>>>,
    strong_members: Rc<RefCell<RepresentativeRelation<Value>>>,
    weak_members: Rc<RefCell<RepresentativeRelation<Value>>>,
}

impl GraphRelation {
    fn new(validate: bool) -> Self {
        let mut graph = Graph::new();
        let strong = StronglyConnected::seeded(graph.adjacency())
            .with_validation(validate)
            .register(&mut graph);
        let weak = WeaklyConnected::seeded(graph.adjacency())
            .with_validation(validate)
            .register(&mut graph);
        let strong_members = RepresentativeRelation::attach(&mut *strong.borrow_mut());
        let weak_members = RepresentativeRelation::attach(&mut *weak.borrow_mut());
        Self {
            graph,
            strong,
            weak,
            strong_members,
            weak_members,
        }
    }

    /// Add one occurrence of the edge. Returns true if the pair is new.
    fn insert(&mut self, source: Value, target: Value) -> SessionResult<bool> {
        let fresh = self.graph.edge_multiplicity(&source, &target) == 0;
        self.graph.insert_node(source.clone());
        self.graph.insert_node(target.clone());
        self.graph.insert_edge(source, target)?;
        Ok(fresh)
    }

    fn matching(&self, pattern: &[Option<Value>]) -> Vec<Tuple> {
        let adjacency = self.graph.adjacency();
        let mut pairs: Vec<(Value, Value)> = match pattern {
            [Some(source), Some(target)] => {
                if adjacency.contains_edge(source, target) {
                    vec![(source.clone(), target.clone())]
                } else {
                    Vec::new()
                }
            }
            [Some(source), None] => adjacency
                .targets(source)
                .map(|target| (source.clone(), target.clone()))
                .collect(),
            [None, Some(target)] => adjacency
                .sources(target)
                .map(|source| (source.clone(), target.clone()))
                .collect(),
            [None, None] => adjacency
                .edges()
                .map(|(source, target, _)| (source.clone(), target.clone()))
                .collect(),
            _ => Vec::new(),
        };
        pairs.sort();
        pairs.into_iter().map(|(s, t)| tuple![s, t]).collect()
    }

    fn members(&self, strong: bool) -> &Rc<RefCell<RepresentativeRelation<Value>>> {
        if strong {
            &self.strong_members
        } else {
            &self.weak_members
        }
    }

    /// `(node, representative)` pairs agreeing with `pattern`.
    fn component_tuples(&self, strong: bool, pattern: &[Option<Value>]) -> Vec<Tuple> {
        let members = self.members(strong).borrow();
        let mut tuples: Vec<Tuple> = match pattern {
            [Some(node), _] => members
                .representative(node)
                .map(|rep| tuple![node.clone(), rep.clone()])
                .into_iter()
                .collect(),
            [None, Some(rep)] => members
                .members(rep)
                .map(|node| tuple![node.clone(), rep.clone()])
                .collect(),
            _ => members
                .tuples()
                .map(|(node, rep)| tuple![node.clone(), rep.clone()])
                .collect(),
        };
        tuples.retain(|t| t.matches(pattern));
        tuples.sort();
        tuples
    }

    fn representative(&self, strong: bool, node: &Value) -> Option<Value> {
        if strong {
            self.strong.borrow().try_representative(node).cloned()
        } else {
            self.weak.borrow().try_representative(node).cloned()
        }
    }

    fn components(&self, strong: bool) -> Vec<BTreeSet<Value>> {
        if strong {
            self.strong.borrow().partition().component_sets()
        } else {
            self.weak.borrow().partition().component_sets()
        }
    }

    /// Reachability in one or more steps, answered from the condensation
    /// unless `shortcuts` is off.
    fn reaches(&self, source: &Value, target: &Value, shortcuts: bool) -> bool {
        let adjacency = self.graph.adjacency();
        if !adjacency.contains_node(source) || !adjacency.contains_node(target) {
            return false;
        }
        if shortcuts {
            if !self.weak.borrow().same_component(source, target) {
                return false;
            }
            return self.strong.borrow().reaches(adjacency, source, target);
        }
        adjacency
            .targets(source)
            .any(|next| traverse::is_reachable(adjacency, next, target, None))
    }

    /// Nodes reachable from `source` in one or more steps, sorted.
    fn reachable_targets(&self, source: &Value, shortcuts: bool) -> Vec<Value> {
        let adjacency = self.graph.adjacency();
        if shortcuts {
            return self.strong.borrow().reachable_targets(adjacency, source);
        }
        let mut nodes = breadth_first(source, |node| adjacency.targets(node).cloned().collect());
        nodes.sort();
        nodes
    }

    /// Nodes reaching `target` in one or more steps, sorted.
    fn reachable_sources(&self, target: &Value, shortcuts: bool) -> Vec<Value> {
        let adjacency = self.graph.adjacency();
        if shortcuts {
            return self.strong.borrow().reachable_sources(adjacency, target);
        }
        let mut nodes = breadth_first(target, |node| adjacency.sources(node).cloned().collect());
        nodes.sort();
        nodes
    }

    fn validate(&self) -> SessionResult<()> {
        let adjacency = self.graph.adjacency();
        self.strong.borrow().validate_against(adjacency)?;
        self.strong.borrow().validate_reduced(adjacency)?;
        self.weak.borrow().validate_against(adjacency)?;
        Ok(())
    }
}

/// Relations the engine searches.
pub struct Model {
    strict: bool,
    tuples: HashMap<String, TupleRelation>,
    graphs: HashMap<String, GraphRelation>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Model {
    /// Create an empty model. Strict consistency makes every maintainer
    /// validate itself after each change and disables reachability shortcuts.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            strict: config.strict_consistency,
            tuples: HashMap::new(),
            graphs: HashMap::new(),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn declared_arity(&self, name: &str) -> Option<usize> {
        if self.graphs.contains_key(name) {
            return Some(2);
        }
        self.tuples.get(name).map(|relation| relation.arity)
    }

    fn check(&self, key: &RelationKey, tuple: &Tuple) -> SessionResult<()> {
        if key.component_base().is_some() {
            return Err(SessionError::derived_relation(key.name()));
        }
        if tuple.arity() != key.arity() {
            return Err(SessionError::arity_mismatch(key.name(), key.arity(), tuple.arity()));
        }
        match self.declared_arity(key.name()) {
            Some(arity) if arity != key.arity() => {
                Err(SessionError::arity_mismatch(key.name(), arity, key.arity()))
            }
            _ => Ok(()),
        }
    }

    fn graph_mut(&mut self, name: &str) -> &mut GraphRelation {
        let strict = self.strict;
        self.graphs
            .entry(name.to_string())
            .or_insert_with(|| GraphRelation::new(strict))
    }

    /// Insert a tuple. Returns true if it was not yet present.
    ///
    /// Binary relations count repeated insertions as parallel edges; the
    /// pair stays visible until every occurrence is removed.
    pub fn insert(&mut self, key: &RelationKey, tuple: Tuple) -> SessionResult<bool> {
        self.check(key, &tuple)?;
        trace!(relation = %key, %tuple, "insert tuple");
        if let [source, target] = tuple.values() {
            let (source, target) = (source.clone(), target.clone());
            return self.graph_mut(key.name()).insert(source, target);
        }
        let arity = key.arity();
        Ok(self
            .tuples
            .entry(key.name().to_string())
            .or_insert_with(|| TupleRelation::new(arity))
            .insert(tuple))
    }

    /// Remove a tuple (one occurrence for binary relations). Returns false
    /// if it was absent.
    pub fn remove(&mut self, key: &RelationKey, tuple: &Tuple) -> SessionResult<bool> {
        self.check(key, tuple)?;
        trace!(relation = %key, %tuple, "remove tuple");
        if let [source, target] = tuple.values() {
            return Ok(self
                .graphs
                .get_mut(key.name())
                .map_or(false, |relation| relation.graph.delete_edge_if_exists(source, target)));
        }
        Ok(self
            .tuples
            .get_mut(key.name())
            .map_or(false, |relation| relation.remove(tuple)))
    }

    /// Add an isolated node to the binary relation `relation`.
    pub fn insert_node(&mut self, relation: &str, node: impl Into<Value>) -> SessionResult<()> {
        match self.declared_arity(relation) {
            Some(arity) if arity != 2 => Err(SessionError::arity_mismatch(relation, arity, 2)),
            _ => {
                self.graph_mut(relation).graph.insert_node(node.into());
                Ok(())
            }
        }
    }

    /// Delete a node and every edge touching it. Returns false if absent.
    pub fn delete_node(&mut self, relation: &str, node: &Value) -> bool {
        let Some(relation) = self.graphs.get_mut(relation) else {
            return false;
        };
        if !relation.graph.contains_node(node) {
            return false;
        }
        relation.graph.delete_node(node);
        true
    }

    /// Number of distinct tuples in a relation.
    pub fn len(&self, key: &RelationKey) -> usize {
        self.count(key, &vec![None; key.arity()])
    }

    /// Representative of the strong component holding `node`.
    pub fn strong_representative(&self, relation: &str, node: &Value) -> Option<Value> {
        self.graphs.get(relation)?.representative(true, node)
    }

    /// Representative of the weak component holding `node`.
    pub fn weak_representative(&self, relation: &str, node: &Value) -> Option<Value> {
        self.graphs.get(relation)?.representative(false, node)
    }

    /// Strong components of a binary relation, sorted.
    pub fn strong_components(&self, relation: &str) -> Vec<BTreeSet<Value>> {
        self.graphs
            .get(relation)
            .map_or_else(Vec::new, |r| r.components(true))
    }

    /// Weak components of a binary relation, sorted.
    pub fn weak_components(&self, relation: &str) -> Vec<BTreeSet<Value>> {
        self.graphs
            .get(relation)
            .map_or_else(Vec::new, |r| r.components(false))
    }

    /// Reachability through `relation` by plain traversal, ignoring shortcuts.
    pub fn reaches_by_traversal(&self, relation: &str, source: &Value, target: &Value) -> bool {
        self.graphs
            .get(relation)
            .map_or(false, |r| r.reaches(source, target, false))
    }

    /// Compare every maintained partition with a batch recomputation.
    pub fn validate(&self) -> SessionResult<()> {
        self.graphs.values().try_for_each(GraphRelation::validate)
    }

    /// The graph behind a binary base relation.
    fn graph(&self, key: &RelationKey) -> Option<&GraphRelation> {
        if key.arity() != 2 || key.component_base().is_some() {
            return None;
        }
        self.graphs.get(key.name())
    }

    /// Breadth-first closure over the enumerated tuples of `key`, sorted.
    fn walk(&self, key: &RelationKey, start: &Value, forward: bool) -> Vec<Value> {
        let (from, to) = if forward { (0, 1) } else { (1, 0) };
        let mut nodes = breadth_first(start, |node| {
            let mut pattern = vec![None, None];
            pattern[from] = Some(node.clone());
            self.enumerate(key, &pattern)
                .filter_map(|tuple| tuple.get(to).cloned())
                .collect()
        });
        nodes.sort();
        nodes
    }

    fn matching(&self, key: &RelationKey, pattern: &[Option<Value>]) -> Vec<Tuple> {
        if pattern.len() != key.arity() {
            return Vec::new();
        }
        if let Some((base, strong)) = key.component_base() {
            return self
                .graphs
                .get(base)
                .map_or_else(Vec::new, |r| r.component_tuples(strong, pattern));
        }
        if key.arity() == 2 {
            if let Some(relation) = self.graphs.get(key.name()) {
                return relation.matching(pattern);
            }
        }
        self.tuples
            .get(key.name())
            .filter(|relation| relation.arity == key.arity())
            .map_or_else(Vec::new, |relation| relation.matching(pattern))
    }
}

impl SearchContext for Model {
    fn enumerate<'c>(&'c self, key: &RelationKey, pattern: &[Option<Value>]) -> TupleIter<'c> {
        Box::new(self.matching(key, pattern).into_iter())
    }

    fn reaches(&self, key: &RelationKey, source: &Value, target: &Value) -> bool {
        match self.graph(key) {
            Some(relation) => relation.reaches(source, target, !self.strict),
            None => self.reachable_targets(key, source).contains(target),
        }
    }

    fn reachable_targets(&self, key: &RelationKey, source: &Value) -> Vec<Value> {
        match self.graph(key) {
            Some(relation) => relation.reachable_targets(source, !self.strict),
            None => self.walk(key, source, true),
        }
    }

    fn reachable_sources(&self, key: &RelationKey, target: &Value) -> Vec<Value> {
        match self.graph(key) {
            Some(relation) => relation.reachable_sources(target, !self.strict),
            None => self.walk(key, target, false),
        }
    }
}
