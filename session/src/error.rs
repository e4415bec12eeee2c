//! Session error types.

use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Planning error.
    #[error("planning error: {0}")]
    PlanError(#[from] trellis_planner::PlanError),

    /// Compilation error.
    #[error("engine error: {0}")]
    EngineError(#[from] trellis_engine::EngineError),

    /// Graph error.
    #[error("graph error: {0}")]
    GraphError(#[from] trellis_graph::GraphError),

    /// Component bookkeeping diverged from the graph.
    #[error("connectivity error: {0}")]
    ConnectivityError(#[from] trellis_connectivity::ConnectivityError),

    /// Tuple does not fit the relation.
    #[error("relation {relation} has arity {expected}, got a tuple of {actual}")]
    ArityMismatch {
        relation: String,
        expected: usize,
        actual: usize,
    },

    /// Derived relations are maintained by the model.
    #[error("relation {relation} is derived and cannot be modified")]
    DerivedRelation { relation: String },
}

impl SessionError {
    pub fn arity_mismatch(relation: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            relation: relation.into(),
            expected,
            actual,
        }
    }

    pub fn derived_relation(relation: impl Into<String>) -> Self {
        Self::DerivedRelation {
            relation: relation.into(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
