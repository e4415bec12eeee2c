//! Constraints over pattern variables.

use crate::Variable;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use trellis_core::{RelationKey, Value};

/// A user-supplied function evaluated over bound input values.
///
/// Returning `None` marks an evaluation failure, which rejects the current
/// binding. Without an output variable the result must be `Bool(true)` for
/// the binding to pass.
#[derive(Clone)]
pub struct ExpressionFn(Arc<dyn Fn(&[Value]) -> Option<Value> + Send + Sync>);

impl ExpressionFn {
    pub fn new(f: impl Fn(&[Value]) -> Option<Value> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, inputs: &[Value]) -> Option<Value> {
        (self.0)(inputs)
    }
}

impl fmt::Debug for ExpressionFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpressionFn({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

impl PartialEq for ExpressionFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ExpressionFn {}

impl Hash for ExpressionFn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

/// Whether a constraint can produce bindings or only test them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Can enumerate values for unbound variables.
    Enumerable,
    /// Must wait until its precondition holds.
    Deferred,
}

/// A constraint over pattern variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// `var` equals a literal value.
    Constant { var: Variable, value: Value },

    /// The tuple of `vars` belongs to the relation `key`.
    Relation { key: RelationKey, vars: Vec<Variable> },

    /// `target` is reachable from `source` through the binary relation `key`
    /// in one or more steps, or zero when `reflexive`.
    TransitiveClosure {
        key: RelationKey,
        source: Variable,
        target: Variable,
        reflexive: bool,
    },

    /// Both variables hold the same value.
    Equality { left: Variable, right: Variable },

    /// The variables hold different values.
    Inequality { left: Variable, right: Variable },

    /// `var` is exported under `name`; it must be bound by another constraint.
    ExportedParameter { var: Variable, name: String },

    /// `function(inputs)` is true, or equals `output` when present.
    ///
    /// `input_types[i]`, when set, names the unary relation that must hold
    /// for `inputs[i]` before the function may be called.
    Expression {
        name: String,
        inputs: Vec<Variable>,
        input_types: Vec<Option<RelationKey>>,
        output: Option<Variable>,
        function: ExpressionFn,
    },
}

impl Constraint {
    pub fn constant(var: Variable, value: impl Into<Value>) -> Self {
        Self::Constant {
            var,
            value: value.into(),
        }
    }

    pub fn relation(key: RelationKey, vars: Vec<Variable>) -> Self {
        Self::Relation { key, vars }
    }

    pub fn transitive_closure(key: RelationKey, source: Variable, target: Variable) -> Self {
        Self::TransitiveClosure {
            key,
            source,
            target,
            reflexive: false,
        }
    }

    pub fn reflexive_transitive_closure(key: RelationKey, source: Variable, target: Variable) -> Self {
        Self::TransitiveClosure {
            key,
            source,
            target,
            reflexive: true,
        }
    }

    pub fn equality(left: Variable, right: Variable) -> Self {
        Self::Equality { left, right }
    }

    pub fn inequality(left: Variable, right: Variable) -> Self {
        Self::Inequality { left, right }
    }

    pub fn exported(var: Variable, name: impl Into<String>) -> Self {
        Self::ExportedParameter {
            var,
            name: name.into(),
        }
    }

    /// Boolean check over the inputs.
    pub fn check(
        name: impl Into<String>,
        inputs: Vec<Variable>,
        function: impl Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::Expression {
            name: name.into(),
            input_types: vec![None; inputs.len()],
            inputs,
            output: None,
            function: ExpressionFn::new(function),
        }
    }

    /// Computed value assigned to (or compared with) `output`.
    pub fn eval(
        name: impl Into<String>,
        inputs: Vec<Variable>,
        output: Variable,
        function: impl Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::Expression {
            name: name.into(),
            input_types: vec![None; inputs.len()],
            inputs,
            output: Some(output),
            function: ExpressionFn::new(function),
        }
    }

    /// Declare the operand types of an expression, one entry per input.
    /// Other constraints are returned unchanged.
    pub fn with_input_types(mut self, types: Vec<Option<RelationKey>>) -> Self {
        if let Constraint::Expression {
            inputs,
            input_types,
            ..
        } = &mut self
        {
            *input_types = types;
            input_types.resize(inputs.len(), None);
        }
        self
    }

    /// Declared type of every expression input, paired with the input.
    pub fn declared_types(&self) -> Vec<(Variable, &RelationKey)> {
        match self {
            Constraint::Expression {
                inputs,
                input_types,
                ..
            } => inputs
                .iter()
                .zip(input_types)
                .filter_map(|(var, key)| key.as_ref().map(|key| (*var, key)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Unary relation constraint `key(var)`.
    pub fn establishes(&self, key: &RelationKey, var: Variable) -> bool {
        matches!(self, Constraint::Relation { key: own, vars } if own == key && vars.len() == 1 && vars[0] == var)
    }

    /// Distinct variables touched by the constraint, in declaration order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        let mut push = |v: Variable| {
            if !vars.contains(&v) {
                vars.push(v);
            }
        };
        match self {
            Constraint::Constant { var, .. } | Constraint::ExportedParameter { var, .. } => push(*var),
            Constraint::Relation { vars: args, .. } => args.iter().copied().for_each(push),
            Constraint::TransitiveClosure { source, target, .. } => {
                push(*source);
                push(*target);
            }
            Constraint::Equality { left, right } | Constraint::Inequality { left, right } => {
                push(*left);
                push(*right);
            }
            Constraint::Expression { inputs, output, .. } => {
                inputs.iter().copied().for_each(&mut push);
                output.iter().copied().for_each(push);
            }
        }
        vars
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Constant { .. } | Constraint::TransitiveClosure { .. } => {
                ConstraintKind::Enumerable
            }
            Constraint::Relation { key, .. } if key.is_enumerable() => ConstraintKind::Enumerable,
            _ => ConstraintKind::Deferred,
        }
    }

    /// Literal constraints are placed before anything else.
    pub fn is_constant(&self) -> bool {
        matches!(self, Constraint::Constant { .. })
    }

    /// Unary relation constraint over `var`.
    pub fn is_unary_relation_over(&self, var: Variable) -> bool {
        matches!(self, Constraint::Relation { vars, .. } if vars.len() == 1 && vars[0] == var)
    }

    /// Rewrite every variable through `map`.
    pub fn substitute(&self, map: impl Fn(Variable) -> Variable) -> Self {
        match self {
            Constraint::Constant { var, value } => Constraint::Constant {
                var: map(*var),
                value: value.clone(),
            },
            Constraint::Relation { key, vars } => Constraint::Relation {
                key: key.clone(),
                vars: vars.iter().map(|v| map(*v)).collect(),
            },
            Constraint::TransitiveClosure {
                key,
                source,
                target,
                reflexive,
            } => Constraint::TransitiveClosure {
                key: key.clone(),
                source: map(*source),
                target: map(*target),
                reflexive: *reflexive,
            },
            Constraint::Equality { left, right } => Constraint::Equality {
                left: map(*left),
                right: map(*right),
            },
            Constraint::Inequality { left, right } => Constraint::Inequality {
                left: map(*left),
                right: map(*right),
            },
            Constraint::ExportedParameter { var, name } => Constraint::ExportedParameter {
                var: map(*var),
                name: name.clone(),
            },
            Constraint::Expression {
                name,
                inputs,
                input_types,
                output,
                function,
            } => Constraint::Expression {
                name: name.clone(),
                inputs: inputs.iter().map(|v| map(*v)).collect(),
                input_types: input_types.clone(),
                output: output.map(&map),
                function: function.clone(),
            },
        }
    }

    /// Human-readable rendering using variable names.
    pub fn describe(&self, names: &[String]) -> String {
        let name = |v: &Variable| {
            names
                .get(v.index())
                .cloned()
                .unwrap_or_else(|| v.to_string())
        };
        let list = |vars: &[Variable]| vars.iter().map(name).collect::<Vec<_>>().join(", ");
        match self {
            Constraint::Constant { var, value } => format!("{} == {}", name(var), value),
            Constraint::Relation { key, vars } => format!("{}({})", key.name(), list(vars)),
            Constraint::TransitiveClosure {
                key,
                source,
                target,
                reflexive,
            } => format!(
                "{}{}({}, {})",
                key.name(),
                if *reflexive { "*" } else { "+" },
                name(source),
                name(target)
            ),
            Constraint::Equality { left, right } => format!("{} == {}", name(left), name(right)),
            Constraint::Inequality { left, right } => format!("{} != {}", name(left), name(right)),
            Constraint::ExportedParameter { var, name: param } => {
                format!("export {} as {}", name(var), param)
            }
            Constraint::Expression {
                name: function,
                inputs,
                output,
                ..
            } => match output {
                Some(out) => format!("{} = {}({})", name(out), function, list(inputs)),
                None => format!("{}({})", function, list(inputs)),
            },
        }
    }
}
