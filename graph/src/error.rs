//! Graph errors.

use thiserror::Error;

/// Errors raised by graph mutations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },
}

impl GraphError {
    pub fn node_not_found(node: &impl std::fmt::Debug) -> Self {
        Self::NodeNotFound(format!("{:?}", node))
    }

    pub fn edge_not_found(source: &impl std::fmt::Debug, target: &impl std::fmt::Debug) -> Self {
        Self::EdgeNotFound {
            from: format!("{:?}", source),
            to: format!("{:?}", target),
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
