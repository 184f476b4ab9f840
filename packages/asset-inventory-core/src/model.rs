//! Inventory records: customers, devices and transient scan results.

use serde::{Deserialize, Serialize};

pub type CustomerId = u32;
pub type DeviceId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Deployment status of a device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    /// In active use at a customer site
    Deployed,
    /// Held in inventory, not yet deployed
    #[default]
    Stock,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Deployed => "deployed",
            DeviceStatus::Stock => "stock",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for DeviceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deployed" => Ok(DeviceStatus::Deployed),
            "stock" => Ok(DeviceStatus::Stock),
            other => Err(format!("unknown device status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub device_name: String,
    pub serial_number: String,
    pub os_type: String,
    pub device_type: String,
    pub user_name: String,
    pub ip_address: String,
    /// Owning customer. Not checked against the customer list.
    pub customer_id: CustomerId,
    pub status: DeviceStatus,
    pub manufacturer: String,
    pub model: String,
}

/// A device reported by the scan simulator.
///
/// Carries the descriptive fields only; it has no id, status or owner until it
/// is imported into the inventory. Note the address lives in `ip`, not
/// `ipAddress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedDevice {
    pub ip: String,
    pub device_name: String,
    pub serial_number: String,
    pub os_type: String,
    pub device_type: String,
    pub user_name: String,
    pub manufacturer: String,
    pub model: String,
}

/// In-progress "Add Customer" form data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerDraft {
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub(crate) fn into_customer(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// In-progress "Add Device" form data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDraft {
    pub device_name: String,
    pub serial_number: String,
    pub os_type: String,
    pub device_type: String,
    pub user_name: String,
    pub ip_address: String,
    /// `None` until a customer has been picked
    pub customer_id: Option<CustomerId>,
    pub status: DeviceStatus,
    pub manufacturer: String,
    pub model: String,
}

impl DeviceDraft {
    pub fn is_submittable(&self) -> bool {
        !self.device_name.trim().is_empty() && self.customer_id.is_some()
    }

    /// Returns `None` when no customer is selected.
    pub(crate) fn into_device(self, id: DeviceId) -> Option<Device> {
        let customer_id = self.customer_id?;
        Some(Device {
            id,
            device_name: self.device_name,
            serial_number: self.serial_number,
            os_type: self.os_type,
            device_type: self.device_type,
            user_name: self.user_name,
            ip_address: self.ip_address,
            customer_id,
            status: self.status,
            manufacturer: self.manufacturer,
            model: self.model,
        })
    }
}

/// Customer that receives devices imported from a scan
pub const SCAN_IMPORT_CUSTOMER_ID: CustomerId = 1;

impl ScannedDevice {
    /// Convert into an inventory record: owned by customer 1 and deployed.
    pub fn to_device(&self, id: DeviceId) -> Device {
        Device {
            id,
            device_name: self.device_name.clone(),
            serial_number: self.serial_number.clone(),
            os_type: self.os_type.clone(),
            device_type: self.device_type.clone(),
            user_name: self.user_name.clone(),
            ip_address: self.ip.clone(),
            customer_id: SCAN_IMPORT_CUSTOMER_ID,
            status: DeviceStatus::Deployed,
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
        }
    }
}
