//! Error types for the scenario framework.

use thiserror::Error;

/// Result type for scenario runs.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A mutation of the step was rejected.
    #[error("step '{step}' failed: {message}")]
    StepExecution { step: String, message: String },

    /// Maintained components diverged from batch recomputation.
    #[error("inconsistent components after step '{step}': {message}")]
    Inconsistent { step: String, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// Session error.
    #[error("session error: {0}")]
    Session(#[from] trellis_session::SessionError),
}

impl ScenarioError {
    pub fn step_execution(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepExecution {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn inconsistent(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inconsistent {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
