//! HTTP client for the Bare Metal and introspection APIs.
//!
//! Both services are reached without authentication ("noauth" mode). Every
//! Bare Metal API request carries the configured microversion header.

use std::time::Duration;

use async_trait::async_trait;
use ironic_agent_core::{Inventory, Node, NodeId, Port};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::version::Microversion;
use crate::ClientConfig;

/// Header carrying the Bare Metal API microversion.
pub const IRONIC_VERSION_HEADER: &str = "X-OpenStack-Ironic-API-Version";

/// Trait for control-plane communication.
///
/// This trait abstracts the HTTP client so callers can be tested without a
/// running control plane.
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    /// Check that the Bare Metal API supports the configured microversion.
    ///
    /// Returns the microversion that will be sent with every request.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::UnsupportedVersion` if the configured
    /// microversion lies outside the range the service supports.
    async fn negotiate_version(&self) -> Result<Microversion>;

    /// Fetch a node.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the node does not exist.
    async fn get_node(&self, node_id: &NodeId) -> Result<Node>;

    /// List the ports of a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_ports(&self, node_id: &NodeId) -> Result<Vec<Port>>;

    /// Send the inventory to the introspection service.
    ///
    /// Returns the node the introspection service matched the report to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no node matched.
    async fn report_inventory(&self, inventory: &Inventory) -> Result<NodeId>;

    /// Fetch a node together with its ports.
    ///
    /// # Errors
    ///
    /// Returns the first error from either lookup.
    async fn node_context(&self, node_id: &NodeId) -> Result<(Node, Vec<Port>)> {
        let node = self.get_node(node_id).await?;
        let ports = self.list_ports(node_id).await?;
        Ok((node, ports))
    }
}

/// Version document returned by the Bare Metal API root.
#[derive(Debug, Deserialize)]
struct RootResponse {
    default_version: VersionDocument,
}

#[derive(Debug, Deserialize)]
struct VersionDocument {
    #[allow(dead_code)]
    id: String,
    min_version: Microversion,
    version: Microversion,
}

#[derive(Debug, Deserialize)]
struct PortsResponse {
    ports: Vec<Port>,
}

/// Body sent to the introspection service.
#[derive(Debug, Serialize)]
struct ContinueRequest<'a> {
    inventory: &'a Inventory,
}

#[derive(Debug, Deserialize)]
struct ContinueResponse {
    uuid: NodeId,
}

/// Error body of the Bare Metal API. `error_message` is itself JSON.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error_message: String,
}

#[derive(Debug, Deserialize)]
struct Fault {
    faultstring: String,
}

/// HTTP client for the Bare Metal and introspection APIs.
#[derive(Debug, Clone)]
pub struct IronicClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl IronicClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a new client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn ironic_get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(IRONIC_VERSION_HEADER, self.config.microversion.to_string())
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        request
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Convert a non-success response into an error.
    async fn error_for(response: reqwest::Response, what: &str) -> ClientError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound(what.to_string());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| {
                serde_json::from_str::<Fault>(&e.error_message)
                    .map_or(e.error_message, |f| f.faultstring)
            })
            .unwrap_or_else(|_| format!("{what} request returned status {status}"));

        tracing::error!(status = %status, error = %message, "Control plane request failed");

        ClientError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ControlPlaneClient for IronicClient {
    async fn negotiate_version(&self) -> Result<Microversion> {
        let response = Self::send(self.client.get(self.config.ironic_root_url())).await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, "version discovery").await);
        }

        let root: RootResponse = Self::decode(response).await?;
        let required = self.config.microversion;
        let supported = root.default_version;

        if required > supported.version || required < supported.min_version {
            return Err(ClientError::UnsupportedVersion {
                required,
                minimum: supported.min_version,
                maximum: supported.version,
            });
        }

        tracing::debug!(
            microversion = %required,
            maximum = %supported.version,
            "Negotiated Bare Metal API version"
        );
        Ok(required)
    }

    async fn get_node(&self, node_id: &NodeId) -> Result<Node> {
        let response = Self::send(self.ironic_get(&self.config.node_url(node_id))).await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, &format!("node {node_id}")).await);
        }

        let node: Node = Self::decode(response).await?;
        tracing::debug!(node_id = %node_id, "Fetched node");
        Ok(node)
    }

    async fn list_ports(&self, node_id: &NodeId) -> Result<Vec<Port>> {
        let request = self
            .ironic_get(&self.config.ports_url())
            .query(&[("node", node_id.to_string()), ("fields", "uuid,address".to_string())]);

        let response = Self::send(request).await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, &format!("ports of node {node_id}")).await);
        }

        let ports: PortsResponse = Self::decode(response).await?;
        tracing::debug!(node_id = %node_id, ports = ports.ports.len(), "Listed ports");
        Ok(ports.ports)
    }

    async fn report_inventory(&self, inventory: &Inventory) -> Result<NodeId> {
        let request = self
            .client
            .post(self.config.continue_url())
            .json(&ContinueRequest { inventory });

        let response = Self::send(request).await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, "introspection").await);
        }

        let matched: ContinueResponse = Self::decode(response).await?;
        tracing::info!(node_id = %matched.uuid, "Inventory accepted by introspection service");
        Ok(matched.uuid)
    }
}
