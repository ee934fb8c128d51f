//! ironic-agent - bare-metal provisioning agent
//!
//! This is the main entry point for the agent that runs inside the
//! deployment ramdisk. It serves the agent API to the conductor and, when
//! control-plane URLs are configured, reports the hardware inventory on boot.
//!
//! # Environment
//!
//! - `LISTEN_ADDR` - API listen address (default `0.0.0.0:9999`)
//! - `INVENTORY_PATH` - inventory report written by hardware tooling
//! - `IRONIC_URL` / `INSPECTOR_URL` - control-plane endpoints; the startup
//!   announcement is skipped unless both are set

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ironic_agent_client::{ClientConfig, IronicClient};
use ironic_agent_gateway::{announce, create_router, GatewayConfig, GatewayState, RetryPolicy};
use ironic_agent_runtime::{AgentService, FileInventoryCollector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ironic_agent=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting ironic-agent");

    // Load configuration from environment
    let defaults = GatewayConfig::default();
    let config = GatewayConfig {
        listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
        inventory_path: std::env::var("INVENTORY_PATH")
            .map_or(defaults.inventory_path, PathBuf::from),
        ironic_url: std::env::var("IRONIC_URL").ok(),
        inspector_url: std::env::var("INSPECTOR_URL").ok(),
        ..defaults
    };

    tracing::info!(
        listen_addr = %config.listen_addr,
        inventory_path = %config.inventory_path.display(),
        ironic_url = ?config.ironic_url,
        inspector_url = ?config.inspector_url,
        "Agent configuration loaded"
    );

    // Initialize the agent with the built-in step catalogs
    let collector = Arc::new(FileInventoryCollector::new(&config.inventory_path));
    let agent = Arc::new(AgentService::with_builtin_steps(collector)?);

    // Bind before announcing so the conductor can reach the API as soon as
    // the node is matched.
    let listen_addr = config.listen_addr.clone();
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    // Announce to the control plane
    if let Some((ironic_url, inspector_url)) = config.control_plane_urls() {
        let client = IronicClient::new(ClientConfig {
            ironic_url: ironic_url.to_string(),
            inspector_url: inspector_url.to_string(),
            ..ClientConfig::default()
        })?;

        let agent = Arc::clone(&agent);
        tokio::spawn(async move {
            match announce(agent.as_ref(), &client, RetryPolicy::default()).await {
                Ok(node_id) => tracing::info!(node = %node_id, "Agent announced"),
                // The conductor can still reach the API; keep serving.
                Err(e) => tracing::error!(error = %e, "Startup announcement failed"),
            }
        });
    } else {
        tracing::warn!("IRONIC_URL or INSPECTOR_URL not set - skipping startup announcement");
    }

    // Start HTTP server
    let app = create_router(GatewayState::new(agent, config));

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    axum::serve(listener, app).await?;

    Ok(())
}
