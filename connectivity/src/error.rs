//! Partition consistency errors.

use thiserror::Error;

/// Violations found when validating a partition against its graph.
///
/// Maintainers treat these as fatal: they signal a broken caller contract or
/// a bug in the incremental update, never a recoverable condition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConnectivityError {
    #[error("Node {0} is not tracked by the partition")]
    Untracked(String),

    #[error("Partition tracks node {0} which is not in the graph")]
    Stale(String),

    #[error("Representative {0} is not a member of its own component")]
    RepresentativeNotMember(String),

    #[error("Node {node} maps to {representative} but is missing from its member set")]
    MemberMismatch { node: String, representative: String },

    #[error("Components differ from batch recomputation: {0}")]
    ComponentMismatch(String),
}

impl ConnectivityError {
    pub fn untracked(node: &impl std::fmt::Debug) -> Self {
        Self::Untracked(format!("{:?}", node))
    }

    pub fn stale(node: &impl std::fmt::Debug) -> Self {
        Self::Stale(format!("{:?}", node))
    }

    pub fn representative_not_member(rep: &impl std::fmt::Debug) -> Self {
        Self::RepresentativeNotMember(format!("{:?}", rep))
    }

    pub fn member_mismatch(node: &impl std::fmt::Debug, rep: &impl std::fmt::Debug) -> Self {
        Self::MemberMismatch {
            node: format!("{:?}", node),
            representative: format!("{:?}", rep),
        }
    }

    pub fn component_mismatch(detail: impl Into<String>) -> Self {
        Self::ComponentMismatch(detail.into())
    }
}

/// Result type for partition validation.
pub type ConnectivityResult<T> = Result<T, ConnectivityError>;
