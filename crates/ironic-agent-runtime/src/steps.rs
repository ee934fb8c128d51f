//! Built-in steps.
//!
//! These steps only inspect the node and ports they are given; they never
//! touch disks or firmware.

use ironic_agent_core::{ConfigDriveError, Node, Port, Step, StepFailure};

/// Interface used by all built-in steps.
pub const DEPLOY_INTERFACE: &str = "deploy";

/// Steps registered in the deploy phase by default.
#[must_use]
pub fn deploy_steps() -> Vec<Step> {
    vec![
        Step::new(DEPLOY_INTERFACE, "validate_ports", 90, validate_ports),
        Step::new(DEPLOY_INTERFACE, "validate_config_drive", 70, validate_config_drive),
        Step::new(DEPLOY_INTERFACE, "log_instance_info", 0, log_instance_info),
    ]
}

/// Steps registered in the clean phase by default.
#[must_use]
pub fn clean_steps() -> Vec<Step> {
    vec![
        Step::new(DEPLOY_INTERFACE, "validate_ports", 90, validate_ports),
        Step::new(DEPLOY_INTERFACE, "log_instance_info", 0, log_instance_info),
    ]
}

fn validate_ports(node: &Node, ports: &[Port]) -> Result<(), StepFailure> {
    if ports.is_empty() {
        return Err(StepFailure::new(format!(
            "node {} has no ports",
            node.display_name()
        )));
    }

    if let Some(port) = ports.iter().find(|p| p.address.trim().is_empty()) {
        return Err(StepFailure::new(format!(
            "port {} of node {} has no MAC address",
            port.uuid,
            node.display_name()
        )));
    }

    tracing::info!(node = %node.display_name(), ports = ports.len(), "Ports validated");
    Ok(())
}

fn validate_config_drive(node: &Node, _ports: &[Port]) -> Result<(), StepFailure> {
    match node.config_drive() {
        Ok(config_drive) => {
            tracing::info!(
                node = %node.display_name(),
                user_data_bytes = config_drive.user_data.len(),
                "Configdrive found"
            );
            Ok(())
        }
        Err(ConfigDriveError::Missing) => {
            tracing::warn!(node = %node.display_name(), "No configdrive, continuing without user data");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn log_instance_info(node: &Node, _ports: &[Port]) -> Result<(), StepFailure> {
    let keys: Vec<&str> = node.instance_info.keys().map(String::as_str).collect();
    tracing::info!(node = %node.display_name(), keys = ?keys, "Instance info");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironic_agent_core::{NodeId, PortId, StepPhase};
    use serde_json::json;

    use crate::registry::StepRegistry;

    fn node(instance_info: serde_json::Value) -> Node {
        let serde_json::Value::Object(map) = instance_info else {
            panic!("fixture must be an object");
        };
        Node::new(NodeId::generate()).with_instance_info(map)
    }

    fn port(address: &str) -> Port {
        Port {
            uuid: PortId::generate(),
            address: address.to_string(),
        }
    }

    #[test]
    fn builtin_catalogs_register_cleanly() {
        let mut deploy = StepRegistry::new(StepPhase::Deploy);
        deploy.register_all(deploy_steps()).unwrap();
        let mut clean = StepRegistry::new(StepPhase::Clean);
        clean.register_all(clean_steps()).unwrap();

        assert_eq!(deploy.list().len(), 3);
        assert_eq!(clean.list().len(), 2);
    }

    #[test]
    fn log_instance_info_is_disabled_by_default() {
        for step in deploy_steps().into_iter().chain(clean_steps()) {
            if step.name() == "log_instance_info" {
                assert_eq!(step.priority(), 0);
            } else {
                assert!(step.priority() > 0);
            }
        }
    }

    #[test]
    fn validate_ports_requires_ports() {
        let node = node(json!({}));
        assert!(validate_ports(&node, &[]).is_err());
        assert!(validate_ports(&node, &[port("")]).is_err());
        assert!(validate_ports(&node, &[port("52:54:00:12:34:56")]).is_ok());
    }

    #[test]
    fn validate_config_drive_tolerates_missing_drive() {
        assert!(validate_config_drive(&node(json!({})), &[]).is_ok());
        assert!(validate_config_drive(&node(json!({"configdrive": {}})), &[]).is_ok());
    }

    #[test]
    fn validate_config_drive_rejects_bad_types() {
        let err = validate_config_drive(&node(json!({"configdrive": "blob"})), &[]).unwrap_err();
        assert!(err.message().contains("not a mapping"));
        assert_eq!(
            err.config_drive_error(),
            Some(ConfigDriveError::UnsupportedFormat)
        );

        let err =
            validate_config_drive(&node(json!({"configdrive": {"user_data": 1}})), &[]).unwrap_err();
        assert!(err.message().contains("not a string"));
        assert_eq!(
            err.config_drive_error(),
            Some(ConfigDriveError::UserDataNotString)
        );
    }
}
