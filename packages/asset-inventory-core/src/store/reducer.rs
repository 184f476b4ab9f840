//! State transitions.
//!
//! `reduce` is the only place snapshots change. It is a pure function of the
//! incoming snapshot and the action; invalid form submissions leave the
//! snapshot untouched.

use super::{DeviceFilter, InventoryState, Tab};
use crate::model::{CustomerDraft, CustomerId, DeviceDraft, DeviceId, ScannedDevice};

/// Everything that can happen to the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    SetDeviceFilter(DeviceFilter),

    ToggleCustomerForm,
    CancelCustomerForm,
    EditCustomerDraft(CustomerDraft),
    /// Add the customer held in the form draft
    SubmitCustomerForm,
    AddCustomer(CustomerDraft),
    DeleteCustomer(CustomerId),

    ToggleDeviceForm,
    CancelDeviceForm,
    EditDeviceDraft(DeviceDraft),
    /// Add the device held in the form draft
    SubmitDeviceForm,
    AddDevice(DeviceDraft),
    DeleteDevice(DeviceId),

    /// Import a scan result as a deployed device of customer 1
    AddScannedDevice(ScannedDevice),

    ScanStarted,
    ScanStep { progress: u8, device: ScannedDevice },
    ScanFinished,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectTab(_) => "select_tab",
            Action::SetDeviceFilter(_) => "set_device_filter",
            Action::ToggleCustomerForm => "toggle_customer_form",
            Action::CancelCustomerForm => "cancel_customer_form",
            Action::EditCustomerDraft(_) => "edit_customer_draft",
            Action::SubmitCustomerForm => "submit_customer_form",
            Action::AddCustomer(_) => "add_customer",
            Action::DeleteCustomer(_) => "delete_customer",
            Action::ToggleDeviceForm => "toggle_device_form",
            Action::CancelDeviceForm => "cancel_device_form",
            Action::EditDeviceDraft(_) => "edit_device_draft",
            Action::SubmitDeviceForm => "submit_device_form",
            Action::AddDevice(_) => "add_device",
            Action::DeleteDevice(_) => "delete_device",
            Action::AddScannedDevice(_) => "add_scanned_device",
            Action::ScanStarted => "scan_started",
            Action::ScanStep { .. } => "scan_step",
            Action::ScanFinished => "scan_finished",
        }
    }
}

/// Produce the next snapshot.
pub fn reduce(state: InventoryState, action: Action) -> InventoryState {
    match action {
        Action::SelectTab(tab) => InventoryState {
            active_tab: tab,
            ..state
        },
        Action::SetDeviceFilter(filter) => InventoryState {
            device_filter: filter,
            ..state
        },

        Action::ToggleCustomerForm => InventoryState {
            show_add_customer: !state.show_add_customer,
            ..state
        },
        Action::CancelCustomerForm => InventoryState {
            show_add_customer: false,
            ..state
        },
        Action::EditCustomerDraft(draft) => InventoryState {
            customer_draft: draft,
            ..state
        },
        Action::SubmitCustomerForm => {
            let draft = state.customer_draft.clone();
            add_customer(state, draft)
        }
        Action::AddCustomer(draft) => add_customer(state, draft),
        Action::DeleteCustomer(id) => delete_customer(state, id),

        Action::ToggleDeviceForm => InventoryState {
            show_add_device: !state.show_add_device,
            ..state
        },
        Action::CancelDeviceForm => InventoryState {
            show_add_device: false,
            ..state
        },
        Action::EditDeviceDraft(draft) => InventoryState {
            device_draft: draft,
            ..state
        },
        Action::SubmitDeviceForm => {
            let draft = state.device_draft.clone();
            add_device(state, draft)
        }
        Action::AddDevice(draft) => add_device(state, draft),
        Action::DeleteDevice(id) => {
            let mut devices = state.devices;
            devices.retain(|d| d.id != id);
            InventoryState { devices, ..state }
        }

        Action::AddScannedDevice(scanned) => {
            let id = state.next_device_id;
            let Some(next_device_id) = id.checked_add(1) else {
                tracing::warn!("Device ids exhausted, not importing {}", scanned.device_name);
                return state;
            };
            let mut devices = state.devices;
            devices.push(scanned.to_device(id));
            tracing::debug!("Imported scanned device {} as device {}", scanned.device_name, id);
            InventoryState {
                devices,
                next_device_id,
                ..state
            }
        }

        Action::ScanStarted => {
            if state.scan.in_progress {
                tracing::debug!("Scan already in progress, ignoring start");
                return state;
            }
            InventoryState {
                scan: super::ScanState {
                    in_progress: true,
                    progress: 0,
                    scanned: Vec::new(),
                },
                ..state
            }
        }
        Action::ScanStep { progress, device } => {
            if !state.scan.in_progress {
                tracing::debug!("Scan step outside of a running scan, ignoring");
                return state;
            }
            let mut scan = state.scan;
            scan.scanned.push(device);
            scan.progress = progress.min(100);
            InventoryState { scan, ..state }
        }
        Action::ScanFinished => {
            let mut scan = state.scan;
            scan.in_progress = false;
            scan.progress = 100;
            InventoryState { scan, ..state }
        }
    }
}

fn add_customer(state: InventoryState, draft: CustomerDraft) -> InventoryState {
    if !draft.is_submittable() {
        tracing::debug!("Customer draft has no name, not adding");
        return state;
    }

    let id = state.next_customer_id;
    let Some(next_customer_id) = id.checked_add(1) else {
        tracing::warn!("Customer ids exhausted, not adding");
        return state;
    };
    let mut customers = state.customers;
    customers.push(draft.into_customer(id));
    tracing::debug!("Added customer {}", id);

    InventoryState {
        customers,
        next_customer_id,
        customer_draft: CustomerDraft::default(),
        show_add_customer: false,
        ..state
    }
}

fn add_device(state: InventoryState, draft: DeviceDraft) -> InventoryState {
    if !draft.is_submittable() {
        tracing::debug!("Device draft needs a name and a customer, not adding");
        return state;
    }

    let id = state.next_device_id;
    let Some(next_device_id) = id.checked_add(1) else {
        tracing::warn!("Device ids exhausted, not adding");
        return state;
    };
    let Some(device) = draft.into_device(id) else {
        return state;
    };

    let mut devices = state.devices;
    devices.push(device);
    tracing::debug!("Added device {}", id);

    InventoryState {
        devices,
        next_device_id,
        device_draft: DeviceDraft::default(),
        show_add_device: false,
        ..state
    }
}

// Customer and its devices go in the same transition so no snapshot ever
// holds orphaned devices.
fn delete_customer(state: InventoryState, id: CustomerId) -> InventoryState {
    let mut customers = state.customers;
    customers.retain(|c| c.id != id);

    let mut devices = state.devices;
    let before = devices.len();
    devices.retain(|d| d.customer_id != id);

    let removed = before - devices.len();
    if removed > 0 {
        tracing::debug!("Deleting customer {} removed {} devices", id, removed);
    }

    InventoryState {
        customers,
        devices,
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceStatus;
    use std::collections::HashSet;

    fn customer_draft(name: &str) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            email: "ops@example.com".to_string(),
            phone: "555-0199".to_string(),
        }
    }

    fn device_draft(name: &str, customer_id: Option<CustomerId>) -> DeviceDraft {
        DeviceDraft {
            device_name: name.to_string(),
            serial_number: "SN-X".to_string(),
            os_type: "Linux".to_string(),
            device_type: "Server".to_string(),
            customer_id,
            ..Default::default()
        }
    }

    fn firewall() -> ScannedDevice {
        crate::scanner::catalog()[0].clone()
    }

    #[test]
    fn test_add_customer_assigns_next_id_and_resets_form() {
        let state = reduce(InventoryState::seeded(), Action::ToggleCustomerForm);
        let state = reduce(state, Action::EditCustomerDraft(customer_draft("Acme")));
        assert!(state.show_add_customer());

        let state = reduce(state, Action::SubmitCustomerForm);
        let added = state.customers().last().unwrap();
        assert_eq!(added.id, 3);
        assert_eq!(added.name, "Acme");
        assert_eq!(state.customer_draft(), &CustomerDraft::default());
        assert!(!state.show_add_customer());
    }

    #[test]
    fn test_blank_customer_name_is_noop() {
        let seeded = InventoryState::seeded();
        for name in ["", "   "] {
            let state = reduce(seeded.clone(), Action::AddCustomer(customer_draft(name)));
            assert_eq!(state, seeded);
        }
    }

    #[test]
    fn test_blank_submit_keeps_form_open() {
        let state = reduce(InventoryState::seeded(), Action::ToggleCustomerForm);
        let state = reduce(state, Action::EditCustomerDraft(customer_draft(" ")));
        let state = reduce(state, Action::SubmitCustomerForm);
        assert!(state.show_add_customer());
        assert_eq!(state.customer_draft().name, " ");
        assert_eq!(state.customers().len(), 2);
    }

    #[test]
    fn test_add_device_requires_name_and_customer() {
        let seeded = InventoryState::seeded();

        let state = reduce(seeded.clone(), Action::AddDevice(device_draft("Srv-1", None)));
        assert_eq!(state.devices().len(), 2);

        let state = reduce(seeded.clone(), Action::AddDevice(device_draft(" ", Some(2))));
        assert_eq!(state.devices().len(), 2);

        let state = reduce(seeded, Action::AddDevice(device_draft("Srv-1", Some(2))));
        let added = state.devices().last().unwrap();
        assert_eq!(added.id, 3);
        assert_eq!(added.customer_id, 2);
        assert_eq!(added.status, DeviceStatus::Stock);
    }

    #[test]
    fn test_add_device_accepts_unknown_customer() {
        let state = reduce(
            InventoryState::seeded(),
            Action::AddDevice(device_draft("Orphan", Some(99))),
        );
        assert_eq!(state.devices().last().unwrap().customer_id, 99);
    }

    #[test]
    fn test_delete_customer_cascades() {
        let state = reduce(
            InventoryState::seeded(),
            Action::AddDevice(device_draft("Srv-2", Some(2))),
        );
        let state = reduce(state, Action::DeleteCustomer(1));

        assert_eq!(state.customers().len(), 1);
        assert_eq!(state.customers()[0].id, 2);
        assert_eq!(state.devices().len(), 1);
        assert_eq!(state.devices()[0].device_name, "Srv-2");
    }

    #[test]
    fn test_delete_missing_ids_is_noop() {
        let seeded = InventoryState::seeded();
        assert_eq!(reduce(seeded.clone(), Action::DeleteCustomer(42)), seeded);
        assert_eq!(reduce(seeded.clone(), Action::DeleteDevice(42)), seeded);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let state = reduce(InventoryState::seeded(), Action::DeleteDevice(2));
        let state = reduce(state, Action::AddDevice(device_draft("Again", Some(1))));
        assert_eq!(state.devices().last().unwrap().id, 3);

        let state = reduce(state, Action::DeleteCustomer(2));
        let state = reduce(state, Action::AddCustomer(customer_draft("Next")));
        assert_eq!(state.customers().last().unwrap().id, 3);
    }

    #[test]
    fn test_ids_unique_across_mixed_operations() {
        let mut state = InventoryState::seeded();
        for round in 0..10u32 {
            state = reduce(state, Action::AddCustomer(customer_draft(&format!("C{}", round))));
            state = reduce(state, Action::AddDevice(device_draft("D", Some(round % 3 + 1))));
            state = reduce(state, Action::AddScannedDevice(firewall()));
            if round % 2 == 0 {
                state = reduce(state, Action::DeleteCustomer(round + 1));
            } else {
                let last = state.devices().last().map(|d| d.id).unwrap_or(0);
                state = reduce(state, Action::DeleteDevice(last));
            }

            let device_ids: HashSet<_> = state.devices().iter().map(|d| d.id).collect();
            let customer_ids: HashSet<_> = state.customers().iter().map(|c| c.id).collect();
            assert_eq!(device_ids.len(), state.devices().len());
            assert_eq!(customer_ids.len(), state.customers().len());
        }
    }

    #[test]
    fn test_add_scanned_device_imports_as_deployed() {
        let state = reduce(InventoryState::seeded(), Action::AddScannedDevice(firewall()));
        let device = state.devices().last().unwrap();

        assert_eq!(device.id, 3);
        assert_eq!(device.device_name, "Firewall-Main");
        assert_eq!(device.ip_address, "192.168.1.5");
        assert_eq!(device.customer_id, 1);
        assert_eq!(device.status, DeviceStatus::Deployed);
    }

    #[test]
    fn test_add_scanned_device_twice_creates_duplicates() {
        let state = reduce(InventoryState::seeded(), Action::AddScannedDevice(firewall()));
        let state = reduce(state, Action::AddScannedDevice(firewall()));
        let ids: Vec<_> = state
            .devices()
            .iter()
            .filter(|d| d.device_name == "Firewall-Main")
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_scan_lifecycle() {
        let state = reduce(InventoryState::seeded(), Action::ScanStarted);
        assert!(state.scan().in_progress);
        assert_eq!(state.scan().progress, 0);

        let state = reduce(
            state,
            Action::ScanStep {
                progress: 25,
                device: firewall(),
            },
        );
        assert_eq!(state.scan().scanned.len(), 1);
        assert_eq!(state.scan().progress, 25);

        // A second start while running changes nothing
        let running = state.clone();
        assert_eq!(reduce(state, Action::ScanStarted), running);

        let state = reduce(running, Action::ScanFinished);
        assert!(!state.scan().in_progress);
        assert_eq!(state.scan().progress, 100);
        assert_eq!(state.scan().scanned.len(), 1);
    }

    #[test]
    fn test_new_scan_clears_previous_results() {
        let state = reduce(InventoryState::seeded(), Action::ScanStarted);
        let state = reduce(
            state,
            Action::ScanStep {
                progress: 0,
                device: firewall(),
            },
        );
        let state = reduce(state, Action::ScanFinished);
        let state = reduce(state, Action::ScanStarted);
        assert!(state.scan().scanned.is_empty());
    }

    #[test]
    fn test_cancel_form_keeps_draft() {
        let state = reduce(InventoryState::seeded(), Action::ToggleDeviceForm);
        let state = reduce(state, Action::EditDeviceDraft(device_draft("Half", None)));
        let state = reduce(state, Action::CancelDeviceForm);
        assert!(!state.show_add_device());
        assert_eq!(state.device_draft().device_name, "Half");
    }

    #[test]
    fn test_exhausted_counters_refuse_new_records() {
        let last = crate::model::Customer {
            id: u32::MAX - 1,
            name: "Last".into(),
            email: String::new(),
            phone: String::new(),
        };
        let state = InventoryState::from_collections(vec![last], Vec::new()).unwrap();
        let state = InventoryState {
            next_device_id: u32::MAX,
            ..state
        };

        let after = reduce(state.clone(), Action::AddCustomer(customer_draft("Overflow")));
        assert_eq!(after, state);

        let after = reduce(state.clone(), Action::AddDevice(device_draft("Overflow", Some(1))));
        assert_eq!(after, state);

        let after = reduce(state.clone(), Action::AddScannedDevice(firewall()));
        assert_eq!(after, state);
    }
}
