//! Node, port and configuration drive types.
//!
//! These are minimal projections of records owned by the Bare Metal API.
//! The agent holds a transient copy for the duration of one operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigDriveError;
use crate::ids::{NodeId, PortId};

/// Key of the configuration drive in a node's instance info.
pub const CONFIG_DRIVE_KEY: &str = "configdrive";

/// Key of the user data inside the configuration drive mapping.
pub const USER_DATA_KEY: &str = "user_data";

/// Short version of a Bare Metal node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique ID.
    pub uuid: NodeId,
    /// Unique name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Instance information. Use [`Node::config_drive`] to extract the
    /// configuration drive.
    #[serde(default)]
    pub instance_info: Map<String, Value>,
}

/// Short version of a Bare Metal port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Unique ID.
    pub uuid: PortId,
    /// MAC address.
    pub address: String,
}

/// First-boot configuration recovered from a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDrive {
    /// User data, typically an Ignition or cloud-init script.
    pub user_data: String,
}

impl Node {
    /// Create a node with empty instance info.
    #[must_use]
    pub fn new(uuid: NodeId) -> Self {
        Self {
            uuid,
            name: None,
            instance_info: Map::new(),
        }
    }

    /// Set the instance info.
    #[must_use]
    pub fn with_instance_info(mut self, instance_info: Map<String, Value>) -> Self {
        self.instance_info = instance_info;
        self
    }

    /// Name if set, otherwise the UUID. Used in log fields.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.uuid.to_string())
    }

    /// Extract the configuration drive from the instance info.
    ///
    /// The `configdrive` key is mandatory and must hold a mapping. Inside it,
    /// `user_data` is optional but must be a string when present; a missing
    /// `user_data` yields empty user data.
    ///
    /// # Errors
    ///
    /// - `ConfigDriveError::Missing` if there is no `configdrive` key.
    /// - `ConfigDriveError::UnsupportedFormat` if it is not a mapping
    ///   (pre-built images are not decoded).
    /// - `ConfigDriveError::UserDataNotString` if `user_data` is not a string.
    pub fn config_drive(&self) -> Result<ConfigDrive, ConfigDriveError> {
        let config_drive = self
            .instance_info
            .get(CONFIG_DRIVE_KEY)
            .ok_or(ConfigDriveError::Missing)?;

        let Value::Object(config_drive) = config_drive else {
            return Err(ConfigDriveError::UnsupportedFormat);
        };

        match config_drive.get(USER_DATA_KEY) {
            None => Ok(ConfigDrive::default()),
            Some(Value::String(user_data)) => Ok(ConfigDrive {
                user_data: user_data.clone(),
            }),
            Some(_) => Err(ConfigDriveError::UserDataNotString),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node_with(instance_info: Value) -> Node {
        let Value::Object(map) = instance_info else {
            panic!("instance info fixture must be an object");
        };
        Node::new(NodeId::generate()).with_instance_info(map)
    }

    #[test]
    fn empty_instance_info_has_no_config_drive() {
        let node = node_with(json!({}));
        assert_eq!(node.config_drive(), Err(ConfigDriveError::Missing));
    }

    #[test]
    fn opaque_blob_is_unsupported() {
        let node = node_with(json!({"configdrive": "opaque-blob"}));
        assert_eq!(node.config_drive(), Err(ConfigDriveError::UnsupportedFormat));
    }

    #[test]
    fn non_mapping_values_are_unsupported() {
        for value in [json!(null), json!(42), json!(["user_data"]), json!(true)] {
            let node = node_with(json!({ "configdrive": value }));
            assert_eq!(node.config_drive(), Err(ConfigDriveError::UnsupportedFormat));
        }
    }

    #[test]
    fn mapping_without_user_data_is_empty() {
        let node = node_with(json!({"configdrive": {}}));
        assert_eq!(node.config_drive().unwrap().user_data, "");
    }

    #[test]
    fn user_data_string_is_returned() {
        let node = node_with(json!({
            "configdrive": {"user_data": "#!/bin/sh\necho hi"},
            "image_source": "http://images.example.com/fcos.raw",
        }));
        assert_eq!(node.config_drive().unwrap().user_data, "#!/bin/sh\necho hi");
    }

    #[test]
    fn non_string_user_data_is_wrong_type() {
        let node = node_with(json!({"configdrive": {"user_data": 12345}}));
        assert_eq!(node.config_drive(), Err(ConfigDriveError::UserDataNotString));

        let node = node_with(json!({"configdrive": {"user_data": {"ignition": {}}}}));
        assert_eq!(node.config_drive(), Err(ConfigDriveError::UserDataNotString));
    }

    #[test]
    fn extraction_is_deterministic() {
        let node = node_with(json!({"configdrive": {"user_data": 1}}));
        assert_eq!(node.config_drive(), node.config_drive());

        let node = node_with(json!({"configdrive": {"user_data": "x", "meta_data": {}}}));
        assert_eq!(node.config_drive(), node.config_drive());
    }

    #[test]
    fn node_decodes_control_plane_record() {
        let value = json!({
            "uuid": "1be26c0b-03f2-4d2e-ae87-c02d7f33c123",
            "name": "node-0",
            "provision_state": "deploying",
            "instance_info": {"configdrive": {"user_data": "data"}},
        });

        let node: Node = serde_json::from_value(value).unwrap();
        assert_eq!(node.name.as_deref(), Some("node-0"));
        assert_eq!(node.display_name(), "node-0");
        assert_eq!(node.config_drive().unwrap().user_data, "data");
    }

    #[test]
    fn unnamed_node_omits_name() {
        let node = Node::new(NodeId::generate());
        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("name").is_none());
        assert_eq!(node.display_name(), node.uuid.to_string());
    }

    #[test]
    fn port_uses_address_field() {
        let value = json!({
            "uuid": "9d3e4b6a-2c1f-4e5d-8a7b-6c5d4e3f2a1b",
            "address": "52:54:00:12:34:56",
        });
        let port: Port = serde_json::from_value(value).unwrap();
        assert_eq!(port.address, "52:54:00:12:34:56");
    }
}
