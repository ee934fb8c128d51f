//! Identifier types for control-plane entities.
//!
//! Nodes and ports are identified by UUIDs assigned by the Bare Metal API.
//! The agent never generates these; it only parses and echoes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A node identifier (UUID format).
///
/// This is the `uuid` field of a node record in the Bare Metal API.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(uuid::Uuid);

/// A port identifier (UUID format).
///
/// This is the `uuid` field of a port record in the Bare Metal API.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortId(uuid::Uuid);

impl NodeId {
    /// Generate a random `NodeId`.
    ///
    /// Only useful for fixtures; real IDs come from the control plane.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    /// Parse a `NodeId` from a UUID string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
        Ok(Self(uuid))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NodeId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0.to_string()
    }
}

impl PortId {
    /// Generate a random `PortId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl FromStr for PortId {
    type Err = IdError;

    /// Parse a `PortId` from a UUID string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
        Ok(Self(uuid))
    }
}

impl fmt::Debug for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PortId({})", self.0)
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PortId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PortId> for String {
    fn from(id: PortId) -> Self {
        id.0.to_string()
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid UUID.
    #[error("invalid UUID format")]
    InvalidUuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_parses_display_form() {
        let id = NodeId::generate();
        let parsed = NodeId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn node_id_invalid_uuid() {
        let result = NodeId::from_str("node-0");
        assert!(matches!(result, Err(IdError::InvalidUuid)));
    }

    #[test]
    fn node_id_serializes_as_plain_string() {
        let id = NodeId::from_str("1be26c0b-03f2-4d2e-ae87-c02d7f33c123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1be26c0b-03f2-4d2e-ae87-c02d7f33c123\"");
    }

    #[test]
    fn port_id_rejects_garbage_in_json() {
        let result: Result<PortId, _> = serde_json::from_str("\"not-a-uuid\"");
        assert!(result.is_err());
    }

    #[test]
    fn port_id_debug_names_type() {
        let id = PortId::generate();
        assert!(format!("{id:?}").starts_with("PortId("));
    }
}
