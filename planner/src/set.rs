//! Constraint sets: the planner's input.

use crate::{Constraint, PlanError, PlanResult, Variable};
use trellis_core::RelationKey;

/// An unordered collection of constraints over a shared variable universe.
///
/// Constraint positions double as their stable sequence numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConstraintSet {
    variables: Vec<String>,
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The variable called `name`, created on first use.
    pub fn variable(&mut self, name: &str) -> Variable {
        match self.variables.iter().position(|v| v == name) {
            Some(index) => Variable(index),
            None => {
                self.variables.push(name.to_string());
                Variable(self.variables.len() - 1)
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Variable> {
        self.variables.iter().position(|v| v == name).map(Variable)
    }

    pub fn variable_name(&self, var: Variable) -> Option<&str> {
        self.variables.get(var.index()).map(String::as_str)
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Add a constraint and return its position.
    pub fn add(&mut self, constraint: Constraint) -> usize {
        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    /// Chaining form of [`ConstraintSet::add`].
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.add(constraint);
        self
    }

    /// Add `key(vars...)`.
    pub fn relation(&mut self, key: RelationKey, vars: &[Variable]) -> usize {
        self.add(Constraint::relation(key, vars.to_vec()))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Check that every referenced variable belongs to this set.
    pub fn validate(&self, outputs: &[Variable]) -> PlanResult<()> {
        let referenced = self
            .constraints
            .iter()
            .flat_map(Constraint::variables)
            .chain(outputs.iter().copied());
        for var in referenced {
            if var.index() >= self.variables.len() {
                return Err(PlanError::UnknownVariable(var.index()));
            }
        }
        Ok(())
    }

    /// Render a constraint with this set's variable names.
    pub fn describe(&self, constraint: &Constraint) -> String {
        constraint.describe(&self.variables)
    }
}
