//! Figures derived from a snapshot.
//!
//! Nothing here is cached: every call walks the current collections, so the
//! numbers always match the snapshot they were computed from.

use crate::model::{Customer, CustomerId, Device, DeviceStatus};
use crate::store::InventoryState;
use serde::Serialize;

/// Name shown for a device whose customer cannot be found
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Number of devices sharing one key (a device type or an OS)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Dashboard and report figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_devices: usize,
    pub total_customers: usize,
    pub devices_deployed: usize,
    pub devices_stock: usize,
    pub devices_by_type: Vec<GroupCount>,
    pub os_by_type: Vec<GroupCount>,
}

/// Device counts for a single customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub deployed: usize,
    pub stock: usize,
    pub total: usize,
}

pub fn count_with_status(devices: &[Device], status: DeviceStatus) -> usize {
    devices.iter().filter(|d| d.status == status).count()
}

/// Count devices per key, keeping keys in the order they were first seen.
pub fn count_by<F>(devices: &[Device], key: F) -> Vec<GroupCount>
where
    F: Fn(&Device) -> &str,
{
    devices.iter().fold(Vec::<GroupCount>::new(), |mut acc, device| {
        let k = key(device);
        match acc.iter_mut().find(|g| g.key == k) {
            Some(group) => group.count += 1,
            None => acc.push(GroupCount {
                key: k.to_string(),
                count: 1,
            }),
        }
        acc
    })
}

pub fn summarize(state: &InventoryState) -> Summary {
    let devices = state.devices();

    Summary {
        total_devices: devices.len(),
        total_customers: state.customers().len(),
        devices_deployed: count_with_status(devices, DeviceStatus::Deployed),
        devices_stock: count_with_status(devices, DeviceStatus::Stock),
        devices_by_type: count_by(devices, |d| d.device_type.as_str()),
        os_by_type: count_by(devices, |d| d.os_type.as_str()),
    }
}

pub fn customer_summary(state: &InventoryState, customer: &Customer) -> CustomerSummary {
    let (deployed, stock) = state
        .devices()
        .iter()
        .filter(|d| d.customer_id == customer.id)
        .fold((0, 0), |(deployed, stock), d| match d.status {
            DeviceStatus::Deployed => (deployed + 1, stock),
            DeviceStatus::Stock => (deployed, stock + 1),
        });

    CustomerSummary {
        customer_id: customer.id,
        name: customer.name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        deployed,
        stock,
        total: deployed + stock,
    }
}

/// Per-customer counts in customer order
pub fn customer_summaries(state: &InventoryState) -> Vec<CustomerSummary> {
    state
        .customers()
        .iter()
        .map(|c| customer_summary(state, c))
        .collect()
}

/// Devices passing the snapshot's current status filter
pub fn visible_devices(state: &InventoryState) -> Vec<&Device> {
    let filter = state.device_filter();
    state.devices().iter().filter(|d| filter.matches(d)).collect()
}

pub fn customer_name(state: &InventoryState, id: CustomerId) -> &str {
    state
        .customer(id)
        .map(|c| c.name.as_str())
        .unwrap_or(UNKNOWN_CUSTOMER)
}
