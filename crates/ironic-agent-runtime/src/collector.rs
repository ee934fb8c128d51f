//! Inventory collection.
//!
//! The agent does not inspect hardware itself. A collector produces an
//! [`Inventory`] on demand; the production collector reads the report that
//! external hardware tooling writes to disk.

use std::path::PathBuf;

use async_trait::async_trait;
use ironic_agent_core::Inventory;

use crate::error::{AgentError, Result};

/// Source of inventory snapshots.
///
/// Every call must return a fresh, complete snapshot or an error; partial
/// results are not allowed.
#[async_trait]
pub trait InventoryCollector: Send + Sync {
    /// Collect the current inventory.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Collection` if the facts cannot be collected.
    async fn collect(&self) -> Result<Inventory>;
}

/// Reads a JSON inventory report from a file on every call.
#[derive(Debug, Clone)]
pub struct FileInventoryCollector {
    path: PathBuf,
}

impl FileInventoryCollector {
    /// Create a collector reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InventoryCollector for FileInventoryCollector {
    async fn collect(&self) -> Result<Inventory> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to read inventory report");
            AgentError::Collection(format!("cannot read {}: {e}", self.path.display()))
        })?;

        let inventory: Inventory = serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to decode inventory report");
            AgentError::Collection(format!("cannot decode {}: {e}", self.path.display()))
        })?;

        inventory.validate()?;

        tracing::debug!(
            path = %self.path.display(),
            disks = inventory.block_devices.len(),
            disk_bytes = inventory.total_disk_bytes(),
            interfaces = inventory.network_interfaces.len(),
            "Collected inventory"
        );
        Ok(inventory)
    }
}

/// Returns a fixed inventory. Useful for development and tests.
#[derive(Debug, Clone)]
pub struct StaticInventoryCollector {
    inventory: Inventory,
}

impl StaticInventoryCollector {
    /// Create a collector that always returns `inventory`.
    #[must_use]
    pub const fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl InventoryCollector for StaticInventoryCollector {
    async fn collect(&self) -> Result<Inventory> {
        Ok(self.inventory.clone())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use ironic_agent_core::{
        BootInfo, BootMode, Inventory, Memory, NetworkInterface, Processors, SystemVendor,
    };

    pub fn inventory() -> Inventory {
        Inventory {
            boot_info: BootInfo {
                current_boot_mode: BootMode::Uefi,
                pxe_interface: Some("52:54:00:12:34:56".to_string()),
                hostname: None,
            },
            block_devices: vec![],
            network_interfaces: vec![NetworkInterface {
                name: "eth0".to_string(),
                mac_address: "52:54:00:12:34:56".to_string(),
                ipv4_address: Some("192.0.2.10".to_string()),
                ipv6_address: None,
                lldp: None,
            }],
            memory: Memory {
                total: 8_589_934_592,
                physical_mb: 8192,
            },
            processors: Processors {
                count: 4,
                architecture: "x86_64".to_string(),
                frequency: 2100,
                model_name: None,
                flags: vec!["sse4_2".to_string()],
            },
            system_vendor: SystemVendor::default(),
            bmc_address_v4: None,
            bmc_address_v6: None,
        }
    }
}
