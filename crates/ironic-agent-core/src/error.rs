//! Common error types for ironic-agent.
//!
//! This module provides the error types shared by the model, the step
//! registry and the agent service.

use thiserror::Error;

use crate::step::{StepKey, StepPhase};

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur throughout the agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No step with the given interface and name exists in the phase.
    #[error("{phase} step not found: {key}")]
    StepNotFound {
        /// The phase that was searched.
        phase: StepPhase,
        /// The key that did not match.
        key: StepKey,
    },

    /// A step with the same interface and name is already registered.
    #[error("{phase} step already registered: {key}")]
    DuplicateStep {
        /// The phase the registration targeted.
        phase: StepPhase,
        /// The conflicting key.
        key: StepKey,
    },

    /// An inventory report violates the model invariants.
    #[error("invalid inventory: {0}")]
    InvalidInventory(String),
}

impl CoreError {
    /// Returns true if this error is the expected negative result of a lookup.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::StepNotFound { .. })
    }
}

/// Reasons the configuration drive cannot be extracted from a node.
///
/// Callers match on the variant to decide whether to continue without user
/// data or abort the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigDriveError {
    /// The node has no `configdrive` key in its instance info.
    #[error("node does not have a configdrive")]
    Missing,

    /// The `configdrive` value is not a mapping.
    #[error("configdrive is not a mapping; pre-built configdrives are not supported")]
    UnsupportedFormat,

    /// The `user_data` value is present but is not a string.
    #[error("configdrive user_data is not a string")]
    UserDataNotString,
}
