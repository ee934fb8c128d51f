//! Error types for the agent runtime.
//!
//! This module defines all errors that can occur while serving inventory,
//! looking up steps and executing them.

use ironic_agent_core::{ConfigDriveError, CoreError, StepKey, StepPhase};
use thiserror::Error;

/// A result type using `AgentError`.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur in agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Hardware facts could not be collected.
    #[error("inventory collection failed: {0}")]
    Collection(String),

    /// No step with the given key exists in the phase.
    #[error("{phase} step not found: {key}")]
    StepNotFound {
        /// The phase that was searched.
        phase: StepPhase,
        /// The key that did not match.
        key: StepKey,
    },

    /// A step with the same key is already registered in the phase.
    #[error("{phase} step already registered: {key}")]
    DuplicateStep {
        /// The phase the registration targeted.
        phase: StepPhase,
        /// The conflicting key.
        key: StepKey,
    },

    /// The step body reported a failure.
    #[error("{phase} step {key} failed: {message}")]
    StepFailed {
        /// The phase of the step.
        phase: StepPhase,
        /// The step that failed.
        key: StepKey,
        /// The failure message from the step body.
        message: String,
    },

    /// The node's configuration drive could not be extracted.
    #[error("configdrive error: {0}")]
    ConfigDrive(#[from] ConfigDriveError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for AgentError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::StepNotFound { phase, key } => Self::StepNotFound { phase, key },
            CoreError::DuplicateStep { phase, key } => Self::DuplicateStep { phase, key },
            CoreError::InvalidInventory(msg) => Self::Collection(msg),
        }
    }
}

impl AgentError {
    /// Returns true for the expected negative result of a step lookup.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::StepNotFound { .. })
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::StepNotFound { .. } => 404,
            Self::DuplicateStep { .. } | Self::StepFailed { .. } => 409,
            Self::ConfigDrive(_) => 422,
            Self::Collection(_) | Self::Internal(_) => 500,
        }
    }
}
