//! Engine errors.

use thiserror::Error;

/// Result type for plan compilation.
pub type EngineResult<T> = Result<T, EngineError>;

/// Problems found while compiling a plan into operations.
///
/// Search itself never fails: a step either succeeds or the search
/// backtracks, and exhaustion simply ends the match sequence.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("Relation {relation} has arity {expected} but is applied to {actual} variables")]
    ArityMismatch {
        relation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Constraint {constraint} needs {} bound before it is applied", .variables.join(", "))]
    UnboundInput {
        constraint: String,
        variables: Vec<String>,
    },

    #[error("Plan does not end with a projection")]
    MissingProjection,
}

impl EngineError {
    pub fn arity_mismatch(relation: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            relation: relation.into(),
            expected,
            actual,
        }
    }

    pub fn unbound_input(constraint: impl Into<String>, variables: Vec<String>) -> Self {
        Self::UnboundInput {
            constraint: constraint.into(),
            variables,
        }
    }
}
