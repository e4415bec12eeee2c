//! Planning errors.

use thiserror::Error;

/// Result type for planning.
pub type PlanResult<T> = Result<T, PlanError>;

/// Build-time planning failures. No partial plan is produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    #[error("Equality {constraint} can never be evaluated: no constraint binds {}", .variables.join(", "))]
    UndeducibleEquality {
        constraint: String,
        variables: Vec<String>,
    },

    #[error("Parameter {name} is never assigned: no constraint binds {variable}")]
    UndeducibleParameter { name: String, variable: String },

    #[error("Operand type of {constraint} cannot be established for {}", .variables.join(", "))]
    TypeUnsafe {
        constraint: String,
        variables: Vec<String>,
    },

    #[error("Constraint {constraint} is missing bindings for {}", .variables.join(", "))]
    MissingVariables {
        constraint: String,
        variables: Vec<String>,
    },

    #[error("Unknown variable: ?{0}")]
    UnknownVariable(usize),

    #[error("Unsupported planner strategy: {0}")]
    UnsupportedStrategy(String),
}

impl PlanError {
    pub fn undeducible_equality(constraint: impl Into<String>, variables: Vec<String>) -> Self {
        Self::UndeducibleEquality {
            constraint: constraint.into(),
            variables,
        }
    }

    pub fn undeducible_parameter(name: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::UndeducibleParameter {
            name: name.into(),
            variable: variable.into(),
        }
    }

    pub fn type_unsafe(constraint: impl Into<String>, variables: Vec<String>) -> Self {
        Self::TypeUnsafe {
            constraint: constraint.into(),
            variables,
        }
    }

    pub fn missing_variables(constraint: impl Into<String>, variables: Vec<String>) -> Self {
        Self::MissingVariables {
            constraint: constraint.into(),
            variables,
        }
    }

    pub fn unsupported_strategy(strategy: impl ToString) -> Self {
        Self::UnsupportedStrategy(strategy.to_string())
    }
}
