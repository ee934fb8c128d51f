//! Hardware inventory model.
//!
//! An [`Inventory`] is a read-only snapshot of the machine the agent runs on:
//! boot state, disks, network interfaces, memory, CPU and chassis facts.
//! It is produced fresh for every request and owned by the caller.
//!
//! Optional fields are `Option`s and are omitted when serialized. An unknown
//! value is `None`, never an empty string: downstream consumers distinguish
//! "not collected" from "collected and empty". [`Inventory::validate`]
//! enforces this for reports produced outside the agent.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Boot mode the machine is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootMode {
    /// UEFI firmware boot.
    #[serde(rename = "uefi")]
    Uefi,
    /// Legacy BIOS boot.
    #[serde(rename = "bios")]
    Legacy,
}

impl BootMode {
    /// Return the wire name of the boot mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uefi => "uefi",
            Self::Legacy => "bios",
        }
    }
}

impl std::fmt::Display for BootMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Information about the current boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootInfo {
    /// Boot mode the machine is currently in.
    pub current_boot_mode: BootMode,
    /// MAC address of the PXE booting interface, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pxe_interface: Option<String>,
    /// The current host name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// A block device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDevice {
    /// Device path, e.g. `/dev/sda`.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Whether the device is a rotational disk.
    pub rotational: bool,
    /// Model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// World Wide Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wwn: Option<String>,
}

/// A raw LLDP type/value pair as received on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpTlv(pub String, pub String);

impl LldpTlv {
    /// Create a TLV from a type and a value.
    #[must_use]
    pub fn new(tlv_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self(tlv_type.into(), value.into())
    }
}

/// A network interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// Interface name.
    pub name: String,
    /// MAC address.
    pub mac_address: String,
    /// Current IPv4 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    /// Current IPv6 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    /// Raw LLDP data in the order it was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lldp: Option<Vec<LldpTlv>>,
}

/// Memory information.
///
/// The two values come from different sources and are not reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Total memory in bytes as seen by the OS.
    pub total: u64,
    /// Physical memory in MiB as reported by DMI.
    pub physical_mb: u64,
}

/// Processor information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processors {
    /// Core count.
    pub count: u32,
    /// Architecture, e.g. `x86_64`.
    pub architecture: String,
    /// Frequency in MHz.
    pub frequency: u32,
    /// Model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// CPU flags, order and duplicates preserved.
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Chassis vendor information. Every field is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemVendor {
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

/// Hardware inventory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Information about the current boot.
    #[serde(rename = "boot")]
    pub boot_info: BootInfo,
    /// Block devices.
    #[serde(rename = "disks", default)]
    pub block_devices: Vec<BlockDevice>,
    /// Network interfaces.
    #[serde(rename = "interfaces", default)]
    pub network_interfaces: Vec<NetworkInterface>,
    /// Memory information.
    pub memory: Memory,
    /// Processor information.
    #[serde(rename = "cpu")]
    pub processors: Processors,
    /// System vendor information.
    #[serde(default)]
    pub system_vendor: SystemVendor,
    /// BMC IPv4 address.
    #[serde(
        rename = "bmc_address",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bmc_address_v4: Option<String>,
    /// BMC IPv6 address.
    #[serde(
        rename = "bmc_v6address",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bmc_address_v6: Option<String>,
}

/// Normalize a collected value: an empty string means "unknown".
///
/// Producers use this so that a blank value read from firmware never ends up
/// as `Some("")` in a report.
#[must_use]
pub fn known(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Inventory {
    /// Check the report invariants.
    ///
    /// Required string fields must be non-blank and optional fields must be
    /// either absent or hold a value [`known`] accepts. A present LLDP list
    /// must not be empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInventory` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        optional("boot.pxe_interface", self.boot_info.pxe_interface.as_deref())?;
        optional("boot.hostname", self.boot_info.hostname.as_deref())?;

        for (i, disk) in self.block_devices.iter().enumerate() {
            required(&format!("disks[{i}].name"), &disk.name)?;
            optional(&format!("disks[{i}].model"), disk.model.as_deref())?;
            optional(&format!("disks[{i}].serial"), disk.serial.as_deref())?;
            optional(&format!("disks[{i}].wwn"), disk.wwn.as_deref())?;
        }

        for (i, iface) in self.network_interfaces.iter().enumerate() {
            required(&format!("interfaces[{i}].name"), &iface.name)?;
            required(&format!("interfaces[{i}].mac_address"), &iface.mac_address)?;
            optional(
                &format!("interfaces[{i}].ipv4_address"),
                iface.ipv4_address.as_deref(),
            )?;
            optional(
                &format!("interfaces[{i}].ipv6_address"),
                iface.ipv6_address.as_deref(),
            )?;
            if iface.lldp.as_ref().is_some_and(Vec::is_empty) {
                return Err(CoreError::InvalidInventory(format!(
                    "optional field interfaces[{i}].lldp is present but empty; omit it instead"
                )));
            }
        }

        required("cpu.architecture", &self.processors.architecture)?;
        optional("cpu.model_name", self.processors.model_name.as_deref())?;

        let vendor = &self.system_vendor;
        optional("system_vendor.product_name", vendor.product_name.as_deref())?;
        optional("system_vendor.serial_number", vendor.serial_number.as_deref())?;
        optional("system_vendor.manufacturer", vendor.manufacturer.as_deref())?;

        optional("bmc_address", self.bmc_address_v4.as_deref())?;
        optional("bmc_v6address", self.bmc_address_v6.as_deref())?;
        Ok(())
    }

    /// Find a network interface by MAC address (case-insensitive).
    #[must_use]
    pub fn interface_by_mac(&self, mac: &str) -> Option<&NetworkInterface> {
        self.network_interfaces
            .iter()
            .find(|iface| iface.mac_address.eq_ignore_ascii_case(mac))
    }

    /// Total size of all block devices in bytes.
    #[must_use]
    pub fn total_disk_bytes(&self) -> u64 {
        self.block_devices
            .iter()
            .fold(0u64, |acc, disk| acc.saturating_add(disk.size))
    }
}

fn required(field: &str, value: &str) -> Result<()> {
    if known(value).is_none() {
        return Err(CoreError::InvalidInventory(format!(
            "required field {field} is empty"
        )));
    }
    Ok(())
}

fn optional(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if known(v).is_none() => Err(CoreError::InvalidInventory(format!(
            "optional field {field} is present but empty; omit it instead"
        ))),
        _ => Ok(()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_optionals_are_omitted() {
        let value = serde_json::to_value(fixtures::minimal()).unwrap();

        assert_eq!(value["boot"], json!({"current_boot_mode": "bios"}));
        assert_eq!(
            value["interfaces"][0],
            json!({"name": "eth0", "mac_address": "52:54:00:ab:cd:ef"})
        );
        assert_eq!(value["system_vendor"], json!({}));
        assert!(value["cpu"].get("model_name").is_none());
        assert!(value.get("bmc_address").is_none());
        assert!(value.get("bmc_v6address").is_none());
    }

    #[test]
    fn required_fields_always_present() {
        let value = serde_json::to_value(fixtures::minimal()).unwrap();

        for key in ["boot", "disks", "interfaces", "memory", "cpu", "system_vendor"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["memory"], json!({"total": 4_294_967_296_u64, "physical_mb": 4096}));
        assert_eq!(value["cpu"]["flags"], json!([]));
    }

    #[test]
    fn uses_wire_field_names() {
        let value = serde_json::to_value(fixtures::full()).unwrap();

        assert_eq!(value["boot"]["current_boot_mode"], "uefi");
        assert_eq!(value["disks"][0]["rotational"], false);
        assert_eq!(value["bmc_address"], "192.0.2.200");
        assert_eq!(value["cpu"]["frequency"], 2400);
    }

    #[test]
    fn lldp_and_flags_keep_order_and_duplicates() {
        let value = serde_json::to_value(fixtures::full()).unwrap();

        assert_eq!(
            value["interfaces"][0]["lldp"],
            json!([["1", "04525400123456"], ["2", "0565746830"], ["1", "04525400123456"]])
        );
        assert_eq!(value["cpu"]["flags"], json!(["fpu", "vme", "fpu"]));

        let back: Inventory = serde_json::from_value(value).unwrap();
        assert_eq!(back.network_interfaces[0].lldp.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn unknown_boot_mode_is_rejected() {
        let mut value = serde_json::to_value(fixtures::minimal()).unwrap();
        value["boot"]["current_boot_mode"] = json!("coreboot");

        let result: std::result::Result<Inventory, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn missing_optionals_decode_as_none() {
        let value = json!({
            "boot": {"current_boot_mode": "uefi"},
            "disks": [{"name": "/dev/vda", "size": 0, "rotational": true}],
            "interfaces": [],
            "memory": {"total": 1, "physical_mb": 1},
            "cpu": {"count": 1, "architecture": "x86_64", "frequency": 1000},
        });

        let inventory: Inventory = serde_json::from_value(value).unwrap();
        assert_eq!(inventory.boot_info.hostname, None);
        assert_eq!(inventory.block_devices[0].wwn, None);
        assert_eq!(inventory.system_vendor, SystemVendor::default());
        assert!(inventory.validate().is_ok());
    }

    #[test]
    fn validate_accepts_fixtures() {
        assert!(fixtures::full().validate().is_ok());
        assert!(fixtures::minimal().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_optional() {
        let mut inventory = fixtures::full();
        inventory.boot_info.hostname = Some(String::new());

        let err = inventory.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInventory(ref msg) if msg.contains("boot.hostname")));
    }

    #[test]
    fn validate_rejects_blank_optional() {
        let mut inventory = fixtures::full();
        inventory.system_vendor.serial_number = Some("   ".to_string());

        let err = inventory.validate().unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidInventory(ref msg) if msg.contains("system_vendor.serial_number"))
        );
    }

    #[test]
    fn validate_rejects_empty_lldp() {
        let mut inventory = fixtures::full();
        inventory.network_interfaces[0].lldp = Some(vec![]);

        let err = inventory.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInventory(ref msg) if msg.contains("interfaces[0].lldp")));
    }

    #[test]
    fn validate_rejects_empty_mac() {
        let mut inventory = fixtures::minimal();
        inventory.network_interfaces[0].mac_address.clear();

        let err = inventory.validate().unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidInventory(ref msg) if msg.contains("interfaces[0].mac_address"))
        );
    }

    #[test]
    fn known_maps_blank_to_none() {
        assert_eq!(known(""), None);
        assert_eq!(known("  "), None);
        assert_eq!(known("node-0"), Some("node-0".to_string()));
    }

    #[test]
    fn interface_lookup_ignores_case() {
        let inventory = fixtures::full();
        let iface = inventory.interface_by_mac("52:54:00:12:34:56".to_uppercase().as_str());
        assert_eq!(iface.map(|i| i.name.as_str()), Some("eno1"));
        assert!(inventory.interface_by_mac("00:00:00:00:00:00").is_none());
    }

    #[test]
    fn total_disk_bytes_sums_devices() {
        let mut inventory = fixtures::full();
        inventory.block_devices.push(BlockDevice {
            name: "/dev/sdb".to_string(),
            size: 1000,
            rotational: true,
            model: None,
            serial: None,
            wwn: None,
        });
        assert_eq!(inventory.total_disk_bytes(), 500_107_862_016 + 1000);
    }
}
