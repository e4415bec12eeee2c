//! Queries over named variables.

use trellis_core::{RelationKey, Value};
use trellis_planner::{Constraint, ConstraintSet, Variable};

/// A constraint set plus its projection, built with variable names.
#[derive(Debug, Clone, Default)]
pub struct Query {
    set: ConstraintSet,
    outputs: Vec<Variable>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn vars(&mut self, names: &[&str]) -> Vec<Variable> {
        names.iter().map(|name| self.set.variable(name)).collect()
    }

    /// `name(vars..)` over an enumerable relation.
    pub fn relation(mut self, name: &str, vars: &[&str]) -> Self {
        let vars = self.vars(vars);
        self.set
            .add(Constraint::relation(RelationKey::new(name, vars.len()), vars));
        self
    }

    /// `name(vars..)` over a membership-only relation.
    pub fn filter(mut self, name: &str, vars: &[&str]) -> Self {
        let vars = self.vars(vars);
        self.set
            .add(Constraint::relation(RelationKey::filter(name, vars.len()), vars));
        self
    }

    /// `var(node, representative)` over the strong components of `relation`.
    pub fn strong_component(mut self, relation: &str, node: &str, representative: &str) -> Self {
        let vars = self.vars(&[node, representative]);
        self.set
            .add(Constraint::relation(RelationKey::strong_components(relation), vars));
        self
    }

    /// `var(node, representative)` over the weak components of `relation`.
    pub fn weak_component(mut self, relation: &str, node: &str, representative: &str) -> Self {
        let vars = self.vars(&[node, representative]);
        self.set
            .add(Constraint::relation(RelationKey::weak_components(relation), vars));
        self
    }

    pub fn constant(mut self, var: &str, value: impl Into<Value>) -> Self {
        let var = self.set.variable(var);
        self.set.add(Constraint::constant(var, value));
        self
    }

    /// One or more steps of `relation` from `source` to `target`.
    pub fn reaches(mut self, relation: &str, source: &str, target: &str) -> Self {
        let (source, target) = (self.set.variable(source), self.set.variable(target));
        self.set.add(Constraint::transitive_closure(
            RelationKey::new(relation, 2),
            source,
            target,
        ));
        self
    }

    /// Zero or more steps of `relation` from `source` to `target`.
    pub fn reaches_or_equals(mut self, relation: &str, source: &str, target: &str) -> Self {
        let (source, target) = (self.set.variable(source), self.set.variable(target));
        self.set.add(Constraint::reflexive_transitive_closure(
            RelationKey::new(relation, 2),
            source,
            target,
        ));
        self
    }

    pub fn equal(mut self, left: &str, right: &str) -> Self {
        let (left, right) = (self.set.variable(left), self.set.variable(right));
        self.set.add(Constraint::equality(left, right));
        self
    }

    pub fn not_equal(mut self, left: &str, right: &str) -> Self {
        let (left, right) = (self.set.variable(left), self.set.variable(right));
        self.set.add(Constraint::inequality(left, right));
        self
    }

    /// Boolean check over bound inputs.
    pub fn check(
        mut self,
        name: &str,
        inputs: &[&str],
        function: impl Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        let inputs = self.vars(inputs);
        self.set.add(Constraint::check(name, inputs, function));
        self
    }

    /// Boolean check whose inputs must first satisfy the named unary relations.
    pub fn typed_check(
        mut self,
        name: &str,
        inputs: &[&str],
        types: &[Option<&str>],
        function: impl Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        let inputs = self.vars(inputs);
        let types = types
            .iter()
            .map(|ty| ty.map(|name| RelationKey::new(name, 1)))
            .collect();
        self.set
            .add(Constraint::check(name, inputs, function).with_input_types(types));
        self
    }

    /// `output = name(inputs..)`.
    pub fn eval(
        mut self,
        output: &str,
        name: &str,
        inputs: &[&str],
        function: impl Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        let inputs = self.vars(inputs);
        let output = self.set.variable(output);
        self.set.add(Constraint::eval(name, inputs, output, function));
        self
    }

    /// Project onto these variables.
    pub fn returns(mut self, vars: &[&str]) -> Self {
        self.outputs = self.vars(vars);
        self
    }

    pub fn set(&self) -> &ConstraintSet {
        &self.set
    }

    pub fn outputs(&self) -> &[Variable] {
        &self.outputs
    }
}
