//! Inventory state container.
//!
//! The whole application state lives in one [`InventoryState`] snapshot.
//! Snapshots are never edited in place by callers: every change goes through
//! [`reduce`], which consumes the current snapshot and returns the next one.
//! [`InventoryStore`] owns the current snapshot and is the single entry point
//! for applying actions.

mod reducer;

pub use reducer::{reduce, Action};

use crate::error::InventoryError;
use crate::fixtures;
use crate::model::{Customer, CustomerDraft, CustomerId, Device, DeviceDraft, DeviceId, ScannedDevice};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Top-level views of the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Customers,
    Devices,
    Network,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Customers,
        Tab::Devices,
        Tab::Network,
        Tab::Reports,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Customers => "Customers",
            Tab::Devices => "Devices",
            Tab::Network => "Network Scan",
            Tab::Reports => "Reports",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Tab::Dashboard),
            "customers" => Ok(Tab::Customers),
            "devices" => Ok(Tab::Devices),
            "network" | "scan" => Ok(Tab::Network),
            "reports" => Ok(Tab::Reports),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// Status filter applied to the device list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFilter {
    #[default]
    All,
    Deployed,
    Stock,
}

impl DeviceFilter {
    pub fn matches(&self, device: &Device) -> bool {
        match self {
            DeviceFilter::All => true,
            DeviceFilter::Deployed => device.status == crate::model::DeviceStatus::Deployed,
            DeviceFilter::Stock => device.status == crate::model::DeviceStatus::Stock,
        }
    }
}

impl std::str::FromStr for DeviceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DeviceFilter::All),
            "deployed" => Ok(DeviceFilter::Deployed),
            "stock" => Ok(DeviceFilter::Stock),
            other => Err(format!("unknown device filter '{}'", other)),
        }
    }
}

/// Transient state of the network scan view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub in_progress: bool,
    /// Percentage shown on the progress bar (0..=100)
    pub progress: u8,
    /// Devices found by the most recent scan, in discovery order
    pub scanned: Vec<ScannedDevice>,
}

/// One immutable snapshot of the inventory and its view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryState {
    customers: Vec<Customer>,
    devices: Vec<Device>,
    active_tab: Tab,
    show_add_customer: bool,
    show_add_device: bool,
    device_filter: DeviceFilter,
    scan: ScanState,
    customer_draft: CustomerDraft,
    device_draft: DeviceDraft,
    // Monotonic: ids are never handed out twice within a session.
    next_customer_id: CustomerId,
    next_device_id: DeviceId,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self::with_counters(Vec::new(), Vec::new(), 1, 1)
    }
}

/// Id following the highest one in `ids`, failing on a repeated id or when
/// the highest id is already `u32::MAX`.
fn next_free_id(
    collection: &'static str,
    ids: impl Iterator<Item = u32>,
) -> Result<u32, InventoryError> {
    let mut seen = HashSet::new();
    let mut max = 0;
    for id in ids {
        if !seen.insert(id) {
            return Err(InventoryError::DuplicateId { collection, id });
        }
        max = max.max(id);
    }
    max.checked_add(1)
        .ok_or(InventoryError::IdsExhausted { collection, last: max })
}

impl InventoryState {
    fn with_counters(
        customers: Vec<Customer>,
        devices: Vec<Device>,
        next_customer_id: CustomerId,
        next_device_id: DeviceId,
    ) -> Self {
        Self {
            customers,
            devices,
            active_tab: Tab::default(),
            show_add_customer: false,
            show_add_device: false,
            device_filter: DeviceFilter::default(),
            scan: ScanState::default(),
            customer_draft: CustomerDraft::default(),
            device_draft: DeviceDraft::default(),
            next_customer_id,
            next_device_id,
        }
    }

    /// Build a state from existing collections. Counters resume after the
    /// highest id present in each collection.
    ///
    /// Rejects collections that repeat an id or leave no id to hand out.
    pub fn from_collections(
        customers: Vec<Customer>,
        devices: Vec<Device>,
    ) -> Result<Self, InventoryError> {
        let next_customer_id = next_free_id("customer", customers.iter().map(|c| c.id))?;
        let next_device_id = next_free_id("device", devices.iter().map(|d| d.id))?;

        Ok(Self::with_counters(
            customers,
            devices,
            next_customer_id,
            next_device_id,
        ))
    }

    /// The demonstration inventory: two customers, two deployed devices.
    pub fn seeded() -> Self {
        // Fixture ids are distinct and small, so this never falls back.
        Self::from_collections(fixtures::seed_customers(), fixtures::seed_devices())
            .unwrap_or_default()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn show_add_customer(&self) -> bool {
        self.show_add_customer
    }

    pub fn show_add_device(&self) -> bool {
        self.show_add_device
    }

    pub fn device_filter(&self) -> DeviceFilter {
        self.device_filter
    }

    pub fn scan(&self) -> &ScanState {
        &self.scan
    }

    pub fn customer_draft(&self) -> &CustomerDraft {
        &self.customer_draft
    }

    pub fn device_draft(&self) -> &DeviceDraft {
        &self.device_draft
    }

    /// Id the next created customer will receive
    pub fn next_customer_id(&self) -> CustomerId {
        self.next_customer_id
    }

    /// Id the next created device will receive
    pub fn next_device_id(&self) -> DeviceId {
        self.next_device_id
    }
}

/// Owner of the current snapshot.
#[derive(Debug, Default)]
pub struct InventoryStore {
    state: InventoryState,
}

impl InventoryStore {
    pub fn new(state: InventoryState) -> Self {
        Self { state }
    }

    pub fn seeded() -> Self {
        Self::new(InventoryState::seeded())
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    /// Apply one action and return the resulting snapshot.
    pub fn dispatch(&mut self, action: Action) -> &InventoryState {
        tracing::trace!("dispatch {}", action.name());
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
        &self.state
    }

}
