//! Control-plane client error types.

use thiserror::Error;

use crate::version::Microversion;

/// A result type using `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the control plane.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with an unexpected status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response, if any.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The Bare Metal API does not support the required microversion.
    #[error("microversion {required} is not supported (service range is {minimum} to {maximum})")]
    UnsupportedVersion {
        /// The microversion this client needs.
        required: Microversion,
        /// The lowest microversion the service supports.
        minimum: Microversion,
        /// The highest microversion the service supports.
        maximum: Microversion,
    },

    /// The response body could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Returns `true` if retrying the request may succeed.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 409,
            Self::NotFound(_)
            | Self::UnsupportedVersion { .. }
            | Self::InvalidResponse(_)
            | Self::InvalidConfig(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retriable_errors() {
        assert!(ClientError::Request("connection refused".into()).is_retriable());
        assert!(ClientError::Status {
            status: 503,
            message: "busy".into()
        }
        .is_retriable());
        assert!(ClientError::Status {
            status: 409,
            message: "node locked".into()
        }
        .is_retriable());
        assert!(!ClientError::Status {
            status: 400,
            message: "bad".into()
        }
        .is_retriable());
        assert!(!ClientError::NotFound("node".into()).is_retriable());
    }
}
