//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use ironic_agent_runtime::IronicAgent;

use crate::handlers::{health, inventory, steps};
use crate::state::GatewayState;

/// Create the agent router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /v1/inventory` - Hardware snapshot
/// - `GET /v1/steps/:phase` - List steps of a phase
/// - `POST /v1/steps/:phase/plan` - Compute execution order
/// - `GET /v1/steps/:phase/:interface/:step` - Get a step
/// - `POST /v1/steps/:phase/:interface/:step/execute` - Run a step
pub fn create_router<A>(state: GatewayState<A>) -> Router
where
    A: IronicAgent + 'static,
{
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health::<A>))
        .route("/v1/inventory", get(inventory::get_inventory::<A>))
        .route("/v1/steps/:phase", get(steps::list_steps::<A>))
        .route("/v1/steps/:phase/plan", post(steps::plan_steps::<A>))
        .route(
            "/v1/steps/:phase/:interface/:step",
            get(steps::get_step::<A>),
        )
        .route(
            "/v1/steps/:phase/:interface/:step/execute",
            post(steps::execute_step::<A>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
