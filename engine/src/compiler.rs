//! Compile search plans into search operations.

use crate::{CheckOperation, EngineError, EngineResult, ExtendOperation, SearchOperation};
use tracing::debug;
use trellis_planner::{Constraint, PlanStep, SearchPlan, Variable, VariableSet};

/// A plan lowered to slot-level operations. Immutable and shareable
/// between concurrent match attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPlan {
    operations: Vec<SearchOperation>,
    frame_size: usize,
    projection: Vec<usize>,
    variable_names: Vec<String>,
}

impl CompiledPlan {
    pub fn operations(&self) -> &[SearchOperation] {
        &self.operations
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Frame slots read by the final projection, in output order.
    pub fn projection(&self) -> &[usize] {
        &self.projection
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Chooses a check or extend operation for each plan step from the
/// variables bound before it.
pub struct OperationCompiler<'p> {
    plan: &'p SearchPlan,
}

impl<'p> OperationCompiler<'p> {
    pub fn new(plan: &'p SearchPlan) -> Self {
        Self { plan }
    }

    /// Compile a whole plan.
    pub fn compile(plan: &SearchPlan) -> EngineResult<CompiledPlan> {
        OperationCompiler::new(plan).run()
    }

    fn run(&self) -> EngineResult<CompiledPlan> {
        let mut operations = Vec::new();
        let mut projection: Option<Vec<usize>> = None;

        for step in self.plan.steps() {
            match step {
                PlanStep::Apply {
                    constraint,
                    bound_before,
                } => {
                    if let Some(op) = self.compile_step(constraint, bound_before)? {
                        operations.push(op);
                    }
                }
                PlanStep::Project { variables } => {
                    projection = Some(variables.iter().map(|v| self.plan.slot(*v)).collect());
                }
            }
        }

        let projection = projection.ok_or(EngineError::MissingProjection)?;
        debug!(
            operations = operations.len(),
            frame = self.plan.variable_count(),
            "compiled search plan"
        );

        Ok(CompiledPlan {
            operations,
            frame_size: self.plan.variable_count(),
            projection,
            variable_names: self.plan.variable_names().to_vec(),
        })
    }

    fn compile_step(
        &self,
        constraint: &Constraint,
        bound: &VariableSet,
    ) -> EngineResult<Option<SearchOperation>> {
        let slot = |v: &Variable| self.plan.slot(*v);
        let is_bound = |v: &Variable| bound.contains(v);

        let op = match constraint {
            Constraint::ExportedParameter { .. } => return Ok(None),

            Constraint::Constant { var, value } => {
                if is_bound(var) {
                    SearchOperation::Check(CheckOperation::Constant {
                        slot: slot(var),
                        value: value.clone(),
                    })
                } else {
                    SearchOperation::Extend(ExtendOperation::Constant {
                        slot: slot(var),
                        value: value.clone(),
                    })
                }
            }

            Constraint::Relation { key, vars } => {
                if key.arity() != vars.len() {
                    return Err(EngineError::arity_mismatch(
                        key.name(),
                        key.arity(),
                        vars.len(),
                    ));
                }
                let slots: Vec<usize> = vars.iter().map(slot).collect();
                if vars.iter().all(is_bound) {
                    SearchOperation::Check(CheckOperation::Relation {
                        key: key.clone(),
                        slots,
                    })
                } else if key.is_enumerable() {
                    SearchOperation::Extend(ExtendOperation::Relation {
                        key: key.clone(),
                        slots,
                        bound: vars.iter().map(is_bound).collect(),
                    })
                } else {
                    return Err(self.unbound(constraint, vars, bound));
                }
            }

            Constraint::TransitiveClosure {
                key,
                source,
                target,
                reflexive,
            } => {
                if key.arity() != 2 {
                    return Err(EngineError::arity_mismatch(key.name(), key.arity(), 2));
                }
                let (key, source_slot, target_slot, reflexive) =
                    (key.clone(), slot(source), slot(target), *reflexive);
                match (is_bound(source), is_bound(target)) {
                    (true, true) => SearchOperation::Check(CheckOperation::Reachability {
                        key,
                        source: source_slot,
                        target: target_slot,
                        reflexive,
                    }),
                    (true, false) => SearchOperation::Extend(ExtendOperation::ClosureForward {
                        key,
                        source: source_slot,
                        target: target_slot,
                        reflexive,
                    }),
                    (false, true) => SearchOperation::Extend(ExtendOperation::ClosureBackward {
                        key,
                        source: source_slot,
                        target: target_slot,
                        reflexive,
                    }),
                    (false, false) => SearchOperation::Extend(ExtendOperation::ClosureAllPairs {
                        key,
                        source: source_slot,
                        target: target_slot,
                        reflexive,
                    }),
                }
            }

            Constraint::Equality { left, right } => match (is_bound(left), is_bound(right)) {
                (true, true) => SearchOperation::Check(CheckOperation::Equality {
                    left: slot(left),
                    right: slot(right),
                }),
                (true, false) => SearchOperation::Extend(ExtendOperation::Copy {
                    from: slot(left),
                    to: slot(right),
                }),
                (false, true) => SearchOperation::Extend(ExtendOperation::Copy {
                    from: slot(right),
                    to: slot(left),
                }),
                (false, false) => return Err(self.unbound(constraint, &[*left, *right], bound)),
            },

            Constraint::Inequality { left, right } => {
                if !(is_bound(left) && is_bound(right)) {
                    return Err(self.unbound(constraint, &[*left, *right], bound));
                }
                SearchOperation::Check(CheckOperation::Inequality {
                    left: slot(left),
                    right: slot(right),
                })
            }

            Constraint::Expression {
                name,
                inputs,
                output,
                function,
                ..
            } => {
                if !inputs.iter().all(is_bound) {
                    return Err(self.unbound(constraint, inputs, bound));
                }
                let input_slots: Vec<usize> = inputs.iter().map(slot).collect();
                match output {
                    Some(out) if !is_bound(out) => {
                        SearchOperation::Extend(ExtendOperation::Expression {
                            name: name.clone(),
                            function: function.clone(),
                            inputs: input_slots,
                            output: slot(out),
                        })
                    }
                    _ => SearchOperation::Check(CheckOperation::Expression {
                        name: name.clone(),
                        function: function.clone(),
                        inputs: input_slots,
                        output: output.as_ref().map(slot),
                    }),
                }
            }
        };

        Ok(Some(op))
    }

    fn unbound(&self, constraint: &Constraint, vars: &[Variable], bound: &VariableSet) -> EngineError {
        let names = self.plan.variable_names();
        let missing = vars
            .iter()
            .filter(|v| !bound.contains(v))
            .map(|v| names.get(v.index()).cloned().unwrap_or_else(|| v.to_string()))
            .collect();
        EngineError::unbound_input(constraint.describe(names), missing)
    }
}
