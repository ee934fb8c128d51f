//! Gateway application state.
//!
//! This module defines the shared state that is available to all request handlers.

use std::sync::Arc;

use ironic_agent_runtime::IronicAgent;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
pub struct GatewayState<A>
where
    A: IronicAgent,
{
    /// The agent answering inventory and step requests.
    pub agent: Arc<A>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<A> GatewayState<A>
where
    A: IronicAgent,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(agent: Arc<A>, config: GatewayConfig) -> Self {
        Self { agent, config }
    }
}

impl<A> Clone for GatewayState<A>
where
    A: IronicAgent,
{
    fn clone(&self) -> Self {
        Self {
            agent: Arc::clone(&self.agent),
            config: self.config.clone(),
        }
    }
}
