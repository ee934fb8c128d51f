//! Step catalog and execution endpoints.
//!
//! Steps are addressed by phase (`deploy` or `clean`), interface and step
//! name. Only descriptors cross the wire; bodies stay in the agent.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use ironic_agent_core::{Node, Port, Step, StepInfo, StepKey, StepPhase};
use ironic_agent_runtime::IronicAgent;

use crate::error::ApiError;
use crate::state::GatewayState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Response for a step list or plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct StepsResponse {
    /// Phase the steps belong to.
    pub phase: StepPhase,
    /// Step descriptors.
    pub steps: Vec<StepInfo>,
}

impl StepsResponse {
    fn new(phase: StepPhase, steps: &[Step]) -> Self {
        Self {
            phase,
            steps: steps.iter().map(|s| s.info().clone()).collect(),
        }
    }
}

/// Request to plan a phase.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlanBody {
    /// Steps to run in addition to the default-enabled ones.
    #[serde(default)]
    pub requested: Vec<StepKey>,
}

/// Request to execute a step.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteStepBody {
    /// The node the step runs against.
    pub node: Node,
    /// The node's ports.
    #[serde(default)]
    pub ports: Vec<Port>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List every step registered for a phase.
///
/// # Errors
///
/// Returns not found if the phase is unknown.
pub async fn list_steps<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path(phase): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    A: IronicAgent + 'static,
{
    let phase: StepPhase = phase.parse()?;
    let steps = state.agent.list_steps(phase).await?;
    Ok(Json(StepsResponse::new(phase, &steps)))
}

/// Get a single step descriptor.
///
/// # Errors
///
/// Returns not found if the phase or step is unknown.
pub async fn get_step<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path((phase, interface, step)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ApiError>
where
    A: IronicAgent + 'static,
{
    let phase: StepPhase = phase.parse()?;
    let step = state.agent.get_step(phase, &interface, &step).await?;
    Ok(Json(step.info().clone()))
}

/// Compute the execution order for a phase.
///
/// # Errors
///
/// Returns bad request for a malformed body and not found if the phase or
/// a requested step is unknown.
pub async fn plan_steps<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path(phase): Path<String>,
    body: Result<Json<PlanBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    A: IronicAgent + 'static,
{
    let phase: StepPhase = phase.parse()?;
    let Json(body) = body?;
    let steps = state.agent.plan(phase, &body.requested).await?;
    Ok(Json(StepsResponse::new(phase, &steps)))
}

/// Run one step against a node.
///
/// # Errors
///
/// Returns bad request for a malformed body, not found if the step is
/// unknown, unprocessable for an invalid configdrive and conflict if the
/// step fails.
pub async fn execute_step<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path((phase, interface, step)): Path<(String, String, String)>,
    body: Result<Json<ExecuteStepBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    A: IronicAgent + 'static,
{
    let phase: StepPhase = phase.parse()?;
    let Json(body) = body?;
    let outcome = state
        .agent
        .execute_step(phase, &interface, &step, body.node, body.ports)
        .await?;
    Ok(Json(outcome))
}
