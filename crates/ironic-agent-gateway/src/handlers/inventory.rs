//! Inventory endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use ironic_agent_runtime::IronicAgent;

use crate::error::ApiError;
use crate::state::GatewayState;

/// Return a fresh hardware snapshot.
///
/// # Errors
///
/// Returns an internal error if the inventory cannot be collected.
pub async fn get_inventory<A>(
    State(state): State<Arc<GatewayState<A>>>,
) -> Result<impl IntoResponse, ApiError>
where
    A: IronicAgent + 'static,
{
    let inventory = state.agent.get_inventory().await?;
    Ok(Json(inventory))
}
