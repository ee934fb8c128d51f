//! Agent service implementation.
//!
//! This module provides the `IronicAgent` trait, the contract the control
//! plane relies on, and `AgentService`, its production implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ironic_agent_core::{plan_steps, Inventory, Node, Port, Step, StepKey, StepPhase};
use parking_lot::RwLock;

use crate::collector::InventoryCollector;
use crate::error::{AgentError, Result};
use crate::registry::StepRegistry;
use crate::types::StepOutcome;

/// Trait defining the agent operations.
///
/// Implementations answer inventory requests and expose one step catalog
/// per phase. Only [`IronicAgent::get_inventory`], [`IronicAgent::list_steps`]
/// and [`IronicAgent::get_step`] are required; the phase-specific methods,
/// planning and execution are derived from them.
#[async_trait]
pub trait IronicAgent: Send + Sync {
    // =========================================================================
    // Inventory
    // =========================================================================

    /// Return the current hardware snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Collection` if the facts cannot be collected.
    async fn get_inventory(&self) -> Result<Inventory>;

    // =========================================================================
    // Step catalog
    // =========================================================================

    /// List every step registered in a phase.
    ///
    /// List order carries no execution meaning; use [`IronicAgent::plan`].
    async fn list_steps(&self, phase: StepPhase) -> Result<Vec<Step>>;

    /// Look up a step by interface and name.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::StepNotFound` if no step matches.
    async fn get_step(&self, phase: StepPhase, interface: &str, step: &str) -> Result<Step>;

    /// List deploy steps.
    async fn list_deploy_steps(&self) -> Result<Vec<Step>> {
        self.list_steps(StepPhase::Deploy).await
    }

    /// List clean steps.
    async fn list_clean_steps(&self) -> Result<Vec<Step>> {
        self.list_steps(StepPhase::Clean).await
    }

    /// Look up a deploy step.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::StepNotFound` if no step matches.
    async fn get_deploy_step(&self, interface: &str, step: &str) -> Result<Step> {
        self.get_step(StepPhase::Deploy, interface, step).await
    }

    /// Look up a clean step.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::StepNotFound` if no step matches.
    async fn get_clean_step(&self, interface: &str, step: &str) -> Result<Step> {
        self.get_step(StepPhase::Clean, interface, step).await
    }

    // =========================================================================
    // Planning and execution
    // =========================================================================

    /// Build the execution order for a phase.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::StepNotFound` if a requested step is unknown.
    async fn plan(&self, phase: StepPhase, requested: &[StepKey]) -> Result<Vec<Step>> {
        let steps = self.list_steps(phase).await?;
        Ok(plan_steps(phase, &steps, requested)?)
    }

    /// Look up a step and run it against a node and its ports.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::StepNotFound` if the step is unknown,
    /// `AgentError::ConfigDrive` if the body rejects the configuration drive
    /// and `AgentError::StepFailed` for any other body failure.
    async fn execute_step(
        &self,
        phase: StepPhase,
        interface: &str,
        step: &str,
        node: Node,
        ports: Vec<Port>,
    ) -> Result<StepOutcome> {
        let step = self.get_step(phase, interface, step).await?;
        run_step(phase, step, node, ports).await
    }
}

/// Run a step body on the blocking pool and record timing.
///
/// # Errors
///
/// Returns `AgentError::ConfigDrive` if the body failed on the configuration
/// drive and `AgentError::StepFailed` for any other body failure.
pub async fn run_step(
    phase: StepPhase,
    step: Step,
    node: Node,
    ports: Vec<Port>,
) -> Result<StepOutcome> {
    let key = step.key();
    let node_id = node.uuid;
    let started_at = Utc::now();

    tracing::info!(phase = %phase, step = %key, node = %node.display_name(), "Executing step");

    let body = step.clone();
    let result = tokio::task::spawn_blocking(move || body.execute(&node, &ports))
        .await
        .map_err(|e| AgentError::Internal(format!("step {key} panicked: {e}")))?;

    if let Err(failure) = result {
        tracing::error!(phase = %phase, step = %key, error = %failure, "Step failed");
        if let Some(e) = failure.config_drive_error() {
            return Err(AgentError::ConfigDrive(e));
        }
        return Err(AgentError::StepFailed {
            phase,
            key,
            message: failure.message().to_string(),
        });
    }

    let outcome = StepOutcome {
        phase,
        step: step.info().clone(),
        node: node_id,
        started_at,
        finished_at: Utc::now(),
    };
    tracing::info!(
        phase = %phase,
        step = %key,
        elapsed_ms = outcome.duration().num_milliseconds(),
        "Step finished"
    );

    Ok(outcome)
}

/// The production agent.
///
/// Holds one step registry per phase. Registries are behind a read-write
/// lock so steps can be registered after construction; readers always see
/// completed registrations.
pub struct AgentService<C: InventoryCollector> {
    collector: Arc<C>,
    deploy: RwLock<StepRegistry>,
    clean: RwLock<StepRegistry>,
}

impl<C: InventoryCollector> AgentService<C> {
    /// Create an agent with empty step catalogs.
    #[must_use]
    pub fn new(collector: Arc<C>) -> Self {
        Self {
            collector,
            deploy: RwLock::new(StepRegistry::new(StepPhase::Deploy)),
            clean: RwLock::new(StepRegistry::new(StepPhase::Clean)),
        }
    }

    /// Create an agent with the built-in steps registered.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::DuplicateStep` if the built-in catalogs conflict.
    pub fn with_builtin_steps(collector: Arc<C>) -> Result<Self> {
        let mut service = Self::new(collector);
        service
            .deploy
            .get_mut()
            .register_all(crate::steps::deploy_steps())?;
        service
            .clean
            .get_mut()
            .register_all(crate::steps::clean_steps())?;
        Ok(service)
    }

    /// Register a step in a phase.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::DuplicateStep` if the phase already has a step
    /// with the same interface and name.
    pub fn register_step(&self, phase: StepPhase, step: Step) -> Result<()> {
        self.registry(phase).write().register(step)?;
        Ok(())
    }

    fn registry(&self, phase: StepPhase) -> &RwLock<StepRegistry> {
        match phase {
            StepPhase::Deploy => &self.deploy,
            StepPhase::Clean => &self.clean,
        }
    }
}

#[async_trait]
impl<C: InventoryCollector + 'static> IronicAgent for AgentService<C> {
    async fn get_inventory(&self) -> Result<Inventory> {
        self.collector.collect().await
    }

    async fn list_steps(&self, phase: StepPhase) -> Result<Vec<Step>> {
        Ok(self.registry(phase).read().list())
    }

    async fn get_step(&self, phase: StepPhase, interface: &str, step: &str) -> Result<Step> {
        Ok(self.registry(phase).read().get(interface, step)?)
    }

    async fn plan(&self, phase: StepPhase, requested: &[StepKey]) -> Result<Vec<Step>> {
        Ok(self.registry(phase).read().plan(requested)?)
    }
}
