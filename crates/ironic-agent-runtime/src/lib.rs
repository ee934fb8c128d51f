//! Agent runtime for ironic-agent.
//!
//! This crate provides the contract the provisioning control plane relies on
//! and its production implementation: inventory retrieval plus deploy and
//! clean step catalogs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Gateway (agent HTTP API)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 IronicAgent (AgentService)                  │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐   │
//! │  │  Inventory  │ │   Deploy    │ │       Clean         │   │
//! │  │  Collector  │ │  Registry   │ │      Registry       │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use ironic_agent_runtime::{AgentService, FileInventoryCollector, IronicAgent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let collector = Arc::new(FileInventoryCollector::new("/run/ironic-agent/inventory.json"));
//! let agent = AgentService::with_builtin_steps(collector)?;
//!
//! let inventory = agent.get_inventory().await?;
//! println!("{} disks", inventory.block_devices.len());
//!
//! let step = agent.get_deploy_step("deploy", "validate_ports").await?;
//! println!("priority {}", step.priority());
//! # Ok(())
//! # }
//! ```
//!
//! # Step ordering
//!
//! Steps with priority 0 only run when explicitly requested. Default-enabled
//! steps run highest priority first; ties are broken by interface name and
//! then step name.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collector;
pub mod error;
pub mod registry;
pub mod service;
pub mod steps;
pub mod types;

pub use collector::{FileInventoryCollector, InventoryCollector, StaticInventoryCollector};
pub use error::{AgentError, Result};
pub use registry::StepRegistry;
pub use service::{run_step, AgentService, IronicAgent};
pub use types::StepOutcome;

// Re-export commonly used types from the model for convenience
pub use ironic_agent_core::{Inventory, Node, NodeId, Port, PortId, Step, StepInfo, StepKey, StepPhase};
