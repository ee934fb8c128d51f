//! Health check endpoint.
//!
//! The control plane polls this to detect that the ramdisk has booted and
//! the agent is serving.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use ironic_agent_core::StepPhase;
use ironic_agent_runtime::IronicAgent;

use crate::error::ApiError;
use crate::state::GatewayState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Agent status.
    pub status: &'static str,
    /// Agent version.
    pub version: &'static str,
    /// Number of registered deploy steps.
    pub deploy_steps: usize,
    /// Number of registered clean steps.
    pub clean_steps: usize,
}

/// Health check handler.
///
/// # Example
///
/// ```text
/// GET /health
///
/// Response: 200 OK
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "deploy_steps": 3,
///   "clean_steps": 2
/// }
/// ```
///
/// # Errors
///
/// Returns an error if a step catalog cannot be read.
pub async fn health<A>(
    State(state): State<Arc<GatewayState<A>>>,
) -> Result<impl IntoResponse, ApiError>
where
    A: IronicAgent + 'static,
{
    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        deploy_steps: state.agent.list_steps(StepPhase::Deploy).await?.len(),
        clean_steps: state.agent.list_steps(StepPhase::Clean).await?.len(),
    };

    Ok((StatusCode::OK, Json(response)))
}
