//! Control-plane client for ironic-agent.
//!
//! This crate talks to the two services the agent reports to:
//!
//! - the Bare Metal API (orchestration): node and port lookups, with
//!   microversion negotiation
//! - the introspection API: inventory reporting
//!
//! Authentication is not used; both endpoints are expected to run in
//! "noauth" mode on the provisioning network.
//!
//! # Example
//!
//! ```no_run
//! use ironic_agent_client::{ClientConfig, ControlPlaneClient, IronicClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig {
//!     ironic_url: "http://192.0.2.1:6385".to_string(),
//!     inspector_url: "http://192.0.2.1:5050".to_string(),
//!     ..ClientConfig::default()
//! };
//!
//! let client = IronicClient::new(config)?;
//! let version = client.negotiate_version().await?;
//! println!("Using microversion {version}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod version;

pub use client::{ControlPlaneClient, IronicClient, IRONIC_VERSION_HEADER};
pub use error::{ClientError, Result};
pub use version::{InvalidMicroversion, Microversion};

use ironic_agent_core::NodeId;

/// Microversion required by this client.
pub const REQUIRED_MICROVERSION: Microversion = Microversion::new(1, 62);

/// Configuration for the control-plane client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Bare Metal API (e.g., `http://192.0.2.1:6385`).
    pub ironic_url: String,
    /// Base URL of the introspection API (e.g., `http://192.0.2.1:5050`).
    pub inspector_url: String,
    /// Microversion sent with every Bare Metal API request.
    pub microversion: Microversion,
    /// Request timeout, in seconds.
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Get the Bare Metal API root URL, used for version discovery.
    #[must_use]
    pub fn ironic_root_url(&self) -> String {
        format!("{}/", self.ironic_url.trim_end_matches('/'))
    }

    /// Get the URL of a node.
    #[must_use]
    pub fn node_url(&self, node_id: &NodeId) -> String {
        format!("{}/v1/nodes/{node_id}", self.ironic_url.trim_end_matches('/'))
    }

    /// Get the port collection URL.
    #[must_use]
    pub fn ports_url(&self) -> String {
        format!("{}/v1/ports", self.ironic_url.trim_end_matches('/'))
    }

    /// Get the introspection continue URL.
    #[must_use]
    pub fn continue_url(&self) -> String {
        format!("{}/v1/continue", self.inspector_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ironic_url: "http://localhost:6385".to_string(),
            inspector_url: "http://localhost:5050".to_string(),
            microversion: REQUIRED_MICROVERSION,
            timeout_seconds: 30,
        }
    }
}
