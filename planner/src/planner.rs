//! Greedy linear planner.

use crate::{
    select, Candidate, Constraint, ConstraintSet, PlanError, PlanResult, PlanStep, SearchPlan,
    Unification, Variable, VariableSet,
};
use tracing::{debug, trace};
use trellis_config::{EngineConfig, EqualityHandling, PlannerStrategy};
use trellis_core::RelationKey;

/// Builds search plans one constraint at a time, always placing the
/// preferred candidate under the ordering heuristics.
#[derive(Debug, Clone)]
pub struct Planner {
    strategy: PlannerStrategy,
    equality: EqualityHandling,
}

/// Bookkeeping while a plan is being built.
struct PlanningState<'a> {
    pending: &'a [Constraint],
    placed: Vec<bool>,
    bound: VariableSet,
    names: &'a [String],
}

impl<'a> PlanningState<'a> {
    fn new(pending: &'a [Constraint], names: &'a [String]) -> Self {
        Self {
            pending,
            placed: vec![false; pending.len()],
            bound: VariableSet::new(),
            names,
        }
    }

    fn is_bound(&self, var: &Variable) -> bool {
        self.bound.contains(var)
    }

    /// Every unary relation constraint over `var` has been placed.
    fn is_type_safe(&self, var: Variable) -> bool {
        self.pending
            .iter()
            .zip(&self.placed)
            .all(|(constraint, placed)| *placed || !constraint.is_unary_relation_over(var))
    }

    /// `key(var)` has been placed.
    fn is_established(&self, key: &RelationKey, var: Variable) -> bool {
        self.pending
            .iter()
            .zip(&self.placed)
            .any(|(constraint, placed)| *placed && constraint.establishes(key, var))
    }

    /// Some constraint of the plan, placed or not, establishes `key(var)`.
    fn can_establish(&self, key: &RelationKey, var: Variable) -> bool {
        self.pending.iter().any(|constraint| constraint.establishes(key, var))
    }

    fn is_ready(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Constant { .. } | Constraint::TransitiveClosure { .. } => true,
            Constraint::Relation { key, vars } => {
                key.is_enumerable() || vars.iter().all(|v| self.is_bound(v))
            }
            Constraint::Equality { left, right } => self.is_bound(left) || self.is_bound(right),
            Constraint::Inequality { left, right } => self.is_bound(left) && self.is_bound(right),
            Constraint::ExportedParameter { var, .. } => self.is_bound(var),
            Constraint::Expression { inputs, .. } => {
                inputs
                    .iter()
                    .all(|v| self.is_bound(v) && self.is_type_safe(*v))
                    && constraint
                        .declared_types()
                        .into_iter()
                        .all(|(var, key)| self.is_established(key, var))
            }
        }
    }

    fn candidate(&self, sequence: usize) -> Candidate {
        let constraint = &self.pending[sequence];
        let vars = constraint.variables();
        let bound = vars.iter().filter(|v| self.is_bound(v)).count();
        Candidate {
            sequence,
            constant: constraint.is_constant(),
            ready: self.is_ready(constraint),
            all_bound: bound == vars.len(),
            bound,
            free: vars.len() - bound,
        }
    }

    fn unplaced(&self) -> impl Iterator<Item = usize> + '_ {
        self.placed
            .iter()
            .enumerate()
            .filter(|(_, placed)| !**placed)
            .map(|(sequence, _)| sequence)
    }

    fn place(&mut self, sequence: usize) -> PlanStep {
        self.placed[sequence] = true;
        let constraint = self.pending[sequence].clone();
        let bound_before = self.bound.clone();
        self.bound.extend(constraint.variables());
        PlanStep::Apply {
            constraint,
            bound_before,
        }
    }

    fn name(&self, var: Variable) -> String {
        self.names
            .get(var.index())
            .cloned()
            .unwrap_or_else(|| var.to_string())
    }

    fn names_of(&self, vars: impl IntoIterator<Item = Variable>) -> Vec<String> {
        vars.into_iter().map(|v| self.name(v)).collect()
    }

    /// Diagnose a constraint that can never become ready.
    fn failure(&self, constraint: &Constraint) -> PlanError {
        let described = constraint.describe(self.names);
        let unbound = |vars: &[Variable]| {
            self.names_of(vars.iter().copied().filter(|v| !self.is_bound(v)))
        };
        match constraint {
            Constraint::Equality { left, right } => {
                PlanError::undeducible_equality(described, self.names_of([*left, *right]))
            }
            Constraint::ExportedParameter { var, name } => {
                PlanError::undeducible_parameter(name.clone(), self.name(*var))
            }
            Constraint::Expression { inputs, .. } if inputs.iter().all(|v| self.is_bound(v)) => {
                let mut unsafe_inputs: Vec<Variable> = Vec::new();
                for (var, key) in constraint.declared_types() {
                    if !self.can_establish(key, var) && !unsafe_inputs.contains(&var) {
                        unsafe_inputs.push(var);
                    }
                }
                for var in inputs {
                    if !self.is_type_safe(*var) && !unsafe_inputs.contains(var) {
                        unsafe_inputs.push(*var);
                    }
                }
                PlanError::type_unsafe(described, self.names_of(unsafe_inputs))
            }
            Constraint::Expression { inputs, .. } => {
                PlanError::missing_variables(described, unbound(inputs.as_slice()))
            }
            other => PlanError::missing_variables(described, unbound(other.variables().as_slice())),
        }
    }
}

impl Planner {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            strategy: config.planner_strategy,
            equality: config.equality_handling,
        }
    }

    pub fn strategy(&self) -> PlannerStrategy {
        self.strategy
    }

    pub fn equality_handling(&self) -> EqualityHandling {
        self.equality
    }

    /// Order `set` into a search plan projecting onto `outputs`.
    pub fn plan(&self, set: &ConstraintSet, outputs: &[Variable]) -> PlanResult<SearchPlan> {
        if self.strategy != PlannerStrategy::BasicLinear {
            return Err(PlanError::unsupported_strategy(self.strategy));
        }
        set.validate(outputs)?;

        let names = set.variable_names();
        let eager = self.equality == EqualityHandling::Eager;
        let unification = if eager {
            Unification::from_equalities(set.variable_count(), set.constraints())
        } else {
            Unification::identity(set.variable_count())
        };

        // Unified equalities hold by construction; they are only checked for
        // whether their class is ever bound.
        let mut unified: Vec<&Constraint> = Vec::new();
        let mut pending: Vec<Constraint> = Vec::new();
        for constraint in set.constraints() {
            if eager && matches!(constraint, Constraint::Equality { .. }) {
                unified.push(constraint);
            } else {
                pending.push(constraint.substitute(|v| unification.find(v)));
            }
        }
        let mut exported = VariableSet::new();
        for output in outputs {
            let var = unification.find(*output);
            if exported.insert(var) {
                pending.push(Constraint::exported(var, names[output.index()].clone()));
            }
        }

        let mut state = PlanningState::new(&pending, names);
        let mut steps = Vec::with_capacity(pending.len() + 1);
        while let Some(best) = select(state.unplaced().map(|i| state.candidate(i))) {
            if !best.ready {
                return Err(state.failure(&pending[best.sequence]));
            }
            let step = state.place(best.sequence);
            trace!(
                step = steps.len(),
                constraint = %pending[best.sequence].describe(names),
                "placed constraint"
            );
            steps.push(step);
        }

        for equality in unified {
            if let Constraint::Equality { left, right } = equality {
                if !state.is_bound(&unification.find(*left)) {
                    return Err(PlanError::undeducible_equality(
                        set.describe(equality),
                        state.names_of([*left, *right]),
                    ));
                }
            }
        }

        steps.push(PlanStep::Project {
            variables: outputs.to_vec(),
        });
        let plan = SearchPlan::new(steps, names.to_vec(), unification, outputs.to_vec());
        debug!(steps = plan.steps().len(), "search plan built:\n{}", plan);
        Ok(plan)
    }
}
