//! Step catalog for one phase.
//!
//! The registry enforces that `(interface, step)` is unique within its
//! phase. Duplicates are rejected at registration time and leave the
//! catalog unchanged.

use std::collections::BTreeMap;

use ironic_agent_core::{plan_steps, CoreError, Result, Step, StepKey, StepPhase};

/// The steps registered for a single phase.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    phase: StepPhase,
    steps: BTreeMap<StepKey, Step>,
}

impl StepRegistry {
    /// Create an empty registry for a phase.
    #[must_use]
    pub const fn new(phase: StepPhase) -> Self {
        Self {
            phase,
            steps: BTreeMap::new(),
        }
    }

    /// Register a step.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateStep` if a step with the same interface
    /// and name is already registered.
    pub fn register(&mut self, step: Step) -> Result<()> {
        let key = step.key();
        if self.steps.contains_key(&key) {
            return Err(CoreError::DuplicateStep {
                phase: self.phase,
                key,
            });
        }

        tracing::debug!(
            phase = %self.phase,
            step = %key,
            priority = step.priority(),
            "Registered step"
        );
        self.steps.insert(key, step);
        Ok(())
    }

    /// Register several steps, stopping at the first duplicate.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateStep` for the first conflicting step.
    /// Steps before it stay registered.
    pub fn register_all(&mut self, steps: impl IntoIterator<Item = Step>) -> Result<()> {
        steps.into_iter().try_for_each(|step| self.register(step))
    }

    /// Look up a step by interface and name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::StepNotFound` if no step matches.
    pub fn get(&self, interface: &str, step: &str) -> Result<Step> {
        let key = StepKey::new(interface, step);
        self.steps
            .get(&key)
            .cloned()
            .ok_or(CoreError::StepNotFound {
                phase: self.phase,
                key,
            })
    }

    /// All registered steps, ordered by interface then name.
    #[must_use]
    pub fn list(&self) -> Vec<Step> {
        self.steps.values().cloned().collect()
    }

    /// Build the execution plan for this phase.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::StepNotFound` if a requested step is unknown.
    pub fn plan(&self, requested: &[StepKey]) -> Result<Vec<Step>> {
        plan_steps(self.phase, &self.list(), requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(interface: &str, step: &str, priority: u32) -> Step {
        Step::new(interface, step, priority, |_, _| Ok(()))
    }

    #[test]
    fn lookup_returns_registered_step() {
        let mut registry = StepRegistry::new(StepPhase::Deploy);
        registry.register(noop("deploy", "write_image", 80)).unwrap();
        registry.register(noop("raid", "apply", 0)).unwrap();

        let step = registry.get("raid", "apply").unwrap();
        assert_eq!(step.interface(), "raid");
        assert_eq!(step.name(), "apply");
        assert_eq!(step.priority(), 0);
    }

    #[test]
    fn lookup_requires_both_parts() {
        let mut registry = StepRegistry::new(StepPhase::Deploy);
        registry.register(noop("deploy", "write_image", 80)).unwrap();

        for (interface, name) in [("raid", "write_image"), ("deploy", "apply"), ("", "")] {
            let err = registry.get(interface, name).unwrap_err();
            assert!(err.is_not_found(), "{interface}.{name}");
        }
    }

    #[test]
    fn lookup_is_repeatable() {
        let mut registry = StepRegistry::new(StepPhase::Clean);
        registry.register(noop("deploy", "erase_devices", 10)).unwrap();

        let first = registry.get("deploy", "erase_devices").unwrap();
        let second = registry.get("deploy", "erase_devices").unwrap();
        assert_eq!(first.info(), second.info());
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = StepRegistry::new(StepPhase::Deploy);
        registry.register(noop("deploy", "write_image", 80)).unwrap();

        let err = registry
            .register(noop("deploy", "write_image", 10))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::DuplicateStep {
                phase: StepPhase::Deploy,
                key: StepKey::new("deploy", "write_image"),
            }
        );

        // The original registration is kept.
        assert_eq!(registry.get("deploy", "write_image").unwrap().priority(), 80);
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn same_name_on_other_interface_is_allowed() {
        let mut registry = StepRegistry::new(StepPhase::Deploy);
        registry
            .register_all([noop("bios", "apply", 0), noop("raid", "apply", 0)])
            .unwrap();
        assert_eq!(registry.list().len(), 2);
    }

    #[test]
    fn list_is_sorted_by_key() {
        let mut registry = StepRegistry::new(StepPhase::Deploy);
        registry
            .register_all([
                noop("raid", "apply", 0),
                noop("deploy", "write_image", 80),
                noop("bios", "apply", 10),
            ])
            .unwrap();

        let keys: Vec<String> = registry.list().iter().map(|s| s.key().to_string()).collect();
        assert_eq!(keys, vec!["bios.apply", "deploy.write_image", "raid.apply"]);
    }

    #[test]
    fn plan_skips_disabled_steps() {
        let mut registry = StepRegistry::new(StepPhase::Clean);
        registry
            .register_all([
                noop("deploy", "erase_devices", 0),
                noop("deploy", "erase_devices_metadata", 99),
            ])
            .unwrap();

        let plan = registry.plan(&[]).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name(), "erase_devices_metadata");
    }
}
