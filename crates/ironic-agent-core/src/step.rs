//! Executable steps.
//!
//! A [`Step`] pairs a plain descriptor ([`StepInfo`]: interface, name,
//! priority) with an execution body. The descriptor is what gets listed and
//! serialized; the body is a closure over a node and its ports.
//!
//! # Ordering
//!
//! Priority 0 disables a step by default. When several default-enabled steps
//! run in one phase they are ordered by priority, highest first, with ties
//! broken by interface name and then step name (both ascending). See
//! [`plan_steps`].

use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigDriveError, CoreError, Result};
use crate::node::{Node, Port};

/// The phase a step catalog belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPhase {
    /// Deployment of an instance.
    Deploy,
    /// Cleaning between tenants.
    Clean,
}

impl StepPhase {
    /// Return the phase name used in URLs and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::Clean => "clean",
        }
    }
}

impl fmt::Display for StepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepPhase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "deploy" => Ok(Self::Deploy),
            "clean" => Ok(Self::Clean),
            other => Err(UnknownPhase(other.to_string())),
        }
    }
}

/// Error returned when parsing an unknown phase name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown step phase: {0}")]
pub struct UnknownPhase(pub String);

/// The two-part key identifying a step within a phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepKey {
    /// Interface name.
    pub interface: String,
    /// Step name.
    pub step: String,
}

impl StepKey {
    /// Create a key.
    #[must_use]
    pub fn new(interface: impl Into<String>, step: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            step: step.into(),
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.interface, self.step)
    }
}

/// Descriptor of a step: everything except the body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepInfo {
    /// Interface name. Conventionally `deploy`, but free-form.
    pub interface: String,
    /// Step name, unique within its interface.
    pub step: String,
    /// Priority. 0 disables the step by default.
    pub priority: u32,
}

impl StepInfo {
    /// Return the lookup key of this step.
    #[must_use]
    pub fn key(&self) -> StepKey {
        StepKey::new(self.interface.clone(), self.step.clone())
    }

    /// Whether the step runs without being explicitly requested.
    #[must_use]
    pub const fn is_enabled_by_default(&self) -> bool {
        self.priority > 0
    }

    /// Whether this descriptor has the given interface and name.
    #[must_use]
    pub fn matches(&self, interface: &str, step: &str) -> bool {
        self.interface == interface && self.step == step
    }
}

/// Compare two descriptors by execution order.
///
/// Higher priority first, then interface name, then step name.
#[must_use]
pub fn execution_order(a: &StepInfo, b: &StepInfo) -> Ordering {
    (Reverse(a.priority), &a.interface, &a.step).cmp(&(Reverse(b.priority), &b.interface, &b.step))
}

/// Failure signal returned by a step body.
///
/// A failure caused by configuration drive extraction keeps the cause so
/// callers can tell the extraction errors apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StepFailure {
    message: String,
    config_drive: Option<ConfigDriveError>,
}

impl StepFailure {
    /// Create a failure with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            config_drive: None,
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The configuration drive error behind this failure, if any.
    #[must_use]
    pub const fn config_drive_error(&self) -> Option<ConfigDriveError> {
        self.config_drive
    }
}

impl From<ConfigDriveError> for StepFailure {
    fn from(err: ConfigDriveError) -> Self {
        Self {
            message: err.to_string(),
            config_drive: Some(err),
        }
    }
}

/// The body of a step.
pub type StepFn = dyn Fn(&Node, &[Port]) -> std::result::Result<(), StepFailure> + Send + Sync;

/// An executable step.
///
/// Cloning is cheap: the body is shared.
#[derive(Clone)]
pub struct Step {
    info: StepInfo,
    execute: Arc<StepFn>,
}

impl Step {
    /// Create a step from its descriptor fields and body.
    pub fn new<F>(interface: impl Into<String>, step: impl Into<String>, priority: u32, execute: F) -> Self
    where
        F: Fn(&Node, &[Port]) -> std::result::Result<(), StepFailure> + Send + Sync + 'static,
    {
        Self {
            info: StepInfo {
                interface: interface.into(),
                step: step.into(),
                priority,
            },
            execute: Arc::new(execute),
        }
    }

    /// The descriptor.
    #[must_use]
    pub const fn info(&self) -> &StepInfo {
        &self.info
    }

    /// Interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.info.interface
    }

    /// Step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.step
    }

    /// Priority.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.info.priority
    }

    /// Lookup key.
    #[must_use]
    pub fn key(&self) -> StepKey {
        self.info.key()
    }

    /// Run the body against a node and its ports.
    ///
    /// # Errors
    ///
    /// Returns whatever failure the body signals.
    pub fn execute(&self, node: &Node, ports: &[Port]) -> std::result::Result<(), StepFailure> {
        (self.execute)(node, ports)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("interface", &self.info.interface)
            .field("step", &self.info.step)
            .field("priority", &self.info.priority)
            .finish_non_exhaustive()
    }
}

/// Build the execution order for a phase.
///
/// Every default-enabled step is included, ordered by [`execution_order`].
/// Requested steps that are disabled by default follow in request order.
/// Requesting a default-enabled step does not run it twice.
///
/// # Errors
///
/// Returns `CoreError::StepNotFound` if a requested key is not in `steps`.
pub fn plan_steps(phase: StepPhase, steps: &[Step], requested: &[StepKey]) -> Result<Vec<Step>> {
    let mut plan: Vec<Step> = steps
        .iter()
        .filter(|s| s.info.is_enabled_by_default())
        .cloned()
        .collect();
    plan.sort_by(|a, b| execution_order(&a.info, &b.info));

    for key in requested {
        let step = steps
            .iter()
            .find(|s| s.info.matches(&key.interface, &key.step))
            .ok_or_else(|| CoreError::StepNotFound {
                phase,
                key: key.clone(),
            })?;

        if !plan.iter().any(|s| s.info == step.info) {
            plan.push(step.clone());
        }
    }

    Ok(plan)
}
