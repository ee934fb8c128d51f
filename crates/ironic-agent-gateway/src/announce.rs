//! Startup announcement to the control plane.
//!
//! On boot the agent checks the Bare Metal API microversion, reports its
//! inventory to the introspection service and fetches the node it was
//! matched to.

use std::time::Duration;

use ironic_agent_client::ControlPlaneClient;
use ironic_agent_core::{Inventory, NodeId, Port};
use ironic_agent_runtime::IronicAgent;

use crate::error::StartupError;

/// Retry policy for the inventory report.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(10),
        }
    }
}

/// Announce the agent and return the node it serves.
///
/// Transient control-plane failures are retried according to `retry`.
///
/// # Errors
///
/// Returns an error if the microversion is unsupported, the inventory
/// cannot be collected, or the control plane keeps failing.
pub async fn announce<A, C>(
    agent: &A,
    client: &C,
    retry: RetryPolicy,
) -> Result<NodeId, StartupError>
where
    A: IronicAgent + ?Sized,
    C: ControlPlaneClient + ?Sized,
{
    let version = client.negotiate_version().await?;
    tracing::info!(microversion = %version, "Bare Metal API version negotiated");

    let inventory = agent.get_inventory().await?;

    let mut attempt = 1;
    let node_id = loop {
        match client.report_inventory(&inventory).await {
            Ok(node_id) => break node_id,
            Err(e) if e.is_retriable() && attempt < retry.attempts => {
                tracing::warn!(attempt, error = %e, "Inventory report failed, retrying");
                attempt += 1;
                tokio::time::sleep(retry.delay).await;
            }
            Err(e) => return Err(e.into()),
        }
    };

    let (node, ports) = client.node_context(&node_id).await?;
    tracing::info!(
        node = %node.display_name(),
        ports = ports.len(),
        "Node matched"
    );

    if ports.is_empty() {
        tracing::warn!(node = %node_id, "Node has no ports registered");
    } else if !boot_port_registered(&inventory, &ports) {
        tracing::warn!(
            node = %node_id,
            pxe_interface = ?inventory.boot_info.pxe_interface,
            "Boot interface does not match any registered port"
        );
    }

    Ok(node_id)
}

/// Whether the interface the ramdisk booted from is one of the node's ports.
///
/// An inventory without a boot interface has nothing to check.
fn boot_port_registered(inventory: &Inventory, ports: &[Port]) -> bool {
    let Some(pxe) = inventory.boot_info.pxe_interface.as_deref() else {
        return true;
    };
    inventory.interface_by_mac(pxe).is_some_and(|iface| {
        ports
            .iter()
            .any(|port| port.address.eq_ignore_ascii_case(&iface.mac_address))
    })
}
