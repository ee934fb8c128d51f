//! HTTP API for the ironic-agent ramdisk.
//!
//! This crate exposes an [`IronicAgent`](ironic_agent_runtime::IronicAgent)
//! over HTTP and announces the agent to the control plane at startup.
//! It handles:
//!
//! - Inventory requests
//! - Step listing, lookup, planning and execution per phase
//! - Inventory reporting and node lookup on boot
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Conductor (Bare Metal API)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ HTTP
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ironic-agent-gateway                      │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │   Router    │ │  Handlers   │ │     Announce        │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//!        ┌────────────────┐            ┌──────────────────┐
//!        │ Agent runtime  │            │ Control-plane    │
//!        │ (steps, inv.)  │            │ client           │
//!        └────────────────┘            └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ironic_agent_gateway::{create_router, GatewayConfig, GatewayState};
//! use ironic_agent_runtime::{AgentService, FileInventoryCollector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::default();
//! let collector = Arc::new(FileInventoryCollector::new(&config.inventory_path));
//! let agent = Arc::new(AgentService::with_builtin_steps(collector)?);
//!
//! let listen_addr = config.listen_addr.clone();
//! let app = create_router(GatewayState::new(agent, config));
//!
//! let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod announce;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use announce::{announce, RetryPolicy};
pub use config::GatewayConfig;
pub use error::{ApiError, StartupError};
pub use routes::create_router;
pub use state::GatewayState;
