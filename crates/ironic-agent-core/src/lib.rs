//! Core model for ironic-agent.
//!
//! This crate provides the data types shared by every other crate in the
//! workspace:
//!
//! - **Inventory**: the hardware snapshot reported to the control plane
//! - **Nodes and ports**: transient copies of control-plane records, plus
//!   configuration drive extraction
//! - **Steps**: interface-scoped, priority-ranked operations and the rule
//!   that orders them
//! - **Identifiers and errors**
//!
//! # Example
//!
//! ```
//! use ironic_agent_core::{Node, NodeId, ConfigDriveError};
//! use serde_json::json;
//!
//! let node: Node = serde_json::from_value(json!({
//!     "uuid": "1be26c0b-03f2-4d2e-ae87-c02d7f33c123",
//!     "instance_info": {"configdrive": {"user_data": "#!/bin/sh\necho hi"}},
//! })).unwrap();
//!
//! assert_eq!(node.config_drive().unwrap().user_data, "#!/bin/sh\necho hi");
//!
//! let bare = Node::new(NodeId::generate());
//! assert_eq!(bare.config_drive(), Err(ConfigDriveError::Missing));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod inventory;
pub mod node;
pub mod step;

pub use error::{ConfigDriveError, CoreError, Result};
pub use ids::{IdError, NodeId, PortId};
pub use inventory::{
    known, BlockDevice, BootInfo, BootMode, Inventory, LldpTlv, Memory, NetworkInterface,
    Processors, SystemVendor,
};
pub use node::{ConfigDrive, Node, Port};
pub use step::{
    execution_order, plan_steps, Step, StepFailure, StepFn, StepInfo, StepKey, StepPhase,
    UnknownPhase,
};
