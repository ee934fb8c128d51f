//! Request and response types for agent operations.

use chrono::{DateTime, Utc};
use ironic_agent_core::{NodeId, StepInfo, StepPhase};
use serde::{Deserialize, Serialize};

/// Result of a successful step execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Phase the step ran in.
    pub phase: StepPhase,
    /// The step that ran.
    pub step: StepInfo,
    /// The node it ran against.
    pub node: NodeId,
    /// When execution started.
    pub started_at: DateTime<Utc>,
    /// When execution finished.
    pub finished_at: DateTime<Utc>,
}

impl StepOutcome {
    /// Wall-clock duration of the step.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
