//! API error types and responses.
//!
//! This module defines the standard error format for all API responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use ironic_agent_client::ClientError;
use ironic_agent_core::UnknownPhase;
use ironic_agent_runtime::AgentError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request is well-formed but its content cannot be processed.
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::BadRequest(_) => "bad_request",
            Self::Unprocessable(_) => "unprocessable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::StepNotFound { phase, key } => {
                Self::NotFound(format!("{phase} step {key}"))
            }
            AgentError::DuplicateStep { .. } | AgentError::StepFailed { .. } => {
                Self::Conflict(err.to_string())
            }
            AgentError::ConfigDrive(e) => Self::Unprocessable(e.to_string()),
            AgentError::Collection(msg) => {
                tracing::error!(error = %msg, "Inventory collection failed");
                Self::Internal("inventory collection failed".to_string())
            }
            AgentError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Self::Internal(msg)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<UnknownPhase> for ApiError {
    fn from(err: UnknownPhase) -> Self {
        Self::NotFound(err.to_string())
    }
}

/// Errors from announcing the agent to the control plane at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The agent could not produce its inventory.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// The control plane rejected or did not answer a request.
    #[error("control plane error: {0}")]
    Client(#[from] ClientError),
}
