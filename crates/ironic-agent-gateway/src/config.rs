//! Gateway configuration types.
//!
//! This module defines configuration for the agent HTTP API and for the
//! optional control-plane endpoints contacted at startup.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:9999").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Path of the inventory report written by hardware tooling.
    #[serde(default = "GatewayConfig::default_inventory_path")]
    pub inventory_path: PathBuf,

    /// Base URL of the Bare Metal API. Startup announcement is skipped if unset.
    #[serde(default)]
    pub ironic_url: Option<String>,

    /// Base URL of the introspection API. Startup announcement is skipped if unset.
    #[serde(default)]
    pub inspector_url: Option<String>,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:9999".to_string()
    }

    fn default_inventory_path() -> PathBuf {
        PathBuf::from("/run/ironic-agent/inventory.json")
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    const fn default_request_timeout() -> u64 {
        // Step bodies run inside the request.
        600
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Both control-plane endpoints, if configured.
    #[must_use]
    pub fn control_plane_urls(&self) -> Option<(&str, &str)> {
        match (&self.ironic_url, &self.inspector_url) {
            (Some(ironic), Some(inspector)) => Some((ironic.as_str(), inspector.as_str())),
            _ => None,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            inventory_path: Self::default_inventory_path(),
            ironic_url: None,
            inspector_url: None,
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}
