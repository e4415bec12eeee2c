//! Search plans: the planner's output.

use crate::{Constraint, Unification, Variable, VariableSet};
use std::fmt;

/// One step of a linear search plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlanStep {
    /// Apply a constraint. `bound_before` lists the variables bound by the
    /// preceding steps.
    Apply {
        constraint: Constraint,
        bound_before: VariableSet,
    },
    /// Final projection onto the output variables.
    Project { variables: Vec<Variable> },
}

impl PlanStep {
    pub fn constraint(&self) -> Option<&Constraint> {
        match self {
            PlanStep::Apply { constraint, .. } => Some(constraint),
            PlanStep::Project { .. } => None,
        }
    }
}

/// An immutable, totally ordered search plan.
///
/// Variables are slot positions of the matching frame after unification:
/// constraints inside the plan already refer to class representatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPlan {
    steps: Vec<PlanStep>,
    variables: Vec<String>,
    unification: Unification,
    outputs: Vec<Variable>,
}

impl SearchPlan {
    pub fn new(
        steps: Vec<PlanStep>,
        variables: Vec<String>,
        unification: Unification,
        outputs: Vec<Variable>,
    ) -> Self {
        Self {
            steps,
            variables,
            unification,
            outputs,
        }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// The applied constraints, in plan order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> + '_ {
        self.steps.iter().filter_map(PlanStep::constraint)
    }

    /// Number of frame slots a matching attempt needs.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variables
    }

    /// Frame slot holding `var`.
    pub fn slot(&self, var: Variable) -> usize {
        self.unification.find(var).index()
    }

    pub fn unification(&self) -> &Unification {
        &self.unification
    }

    /// Requested output variables, as given to the planner.
    pub fn outputs(&self) -> &[Variable] {
        &self.outputs
    }

    /// Frame slots of the projection, in output order.
    pub fn output_slots(&self) -> Vec<usize> {
        self.outputs.iter().map(|v| self.slot(*v)).collect()
    }
}

impl fmt::Display for SearchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                PlanStep::Apply { constraint, .. } => {
                    writeln!(f, "{}: {}", index, constraint.describe(&self.variables))?
                }
                PlanStep::Project { variables } => {
                    let names: Vec<&str> = variables
                        .iter()
                        .map(|v| self.variables.get(v.index()).map_or("?", String::as_str))
                        .collect();
                    write!(f, "{}: project({})", index, names.join(", "))?
                }
            }
        }
        Ok(())
    }
}
