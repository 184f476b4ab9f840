//! End-to-end session: scan, import, edit, export.

use asset_inventory_core::aggregates::summarize;
use asset_inventory_core::export::{self, ExportDocument, ExportFormat};
use asset_inventory_core::scanner::{self, InstantClock};
use asset_inventory_core::{
    Action, CustomerDraft, DeviceDraft, DeviceStatus, InventoryError, InventoryStore,
};
use chrono::Utc;

#[tokio::test]
async fn test_scan_import_and_export() {
    let mut store = InventoryStore::seeded();

    let found = scanner::run_scan(&mut store, &InstantClock, scanner::DEFAULT_STEP_DELAY, None)
        .await
        .expect("scan should run");
    let names: Vec<&str> = found.iter().map(|d| d.device_name.as_str()).collect();
    assert_eq!(
        names,
        ["Firewall-Main", "Printer-Office", "Switch-Core", "Desktop-Sales"]
    );

    let existing: Vec<u32> = store.state().devices().iter().map(|d| d.id).collect();
    store.dispatch(Action::AddScannedDevice(found[0].clone()));
    let imported = store.state().devices().last().unwrap().clone();
    assert!(!existing.contains(&imported.id));
    assert_eq!(imported.status, DeviceStatus::Deployed);
    assert_eq!(imported.customer_id, 1);
    assert_eq!(imported.ip_address, "192.168.1.5");

    // Scanned list is left alone after import
    assert_eq!(store.state().scan().scanned.len(), 4);

    store.dispatch(Action::AddCustomer(CustomerDraft {
        name: "Harbor Logistics".into(),
        email: "it@harbor.example".into(),
        phone: "555-0150".into(),
    }));
    store.dispatch(Action::AddDevice(DeviceDraft {
        device_name: "Tablet-01".into(),
        device_type: "Tablet".into(),
        os_type: "iPadOS 17".into(),
        customer_id: Some(3),
        ..Default::default()
    }));

    let summary = summarize(store.state());
    assert_eq!(summary.total_devices, 4);
    assert_eq!(summary.devices_deployed, 3);
    assert_eq!(summary.devices_stock, 1);

    let at = Utc::now();
    let dir = tempfile::tempdir().unwrap();
    let path = export::write_export(dir.path(), ExportFormat::Json, store.state(), at).unwrap();
    let document = ExportDocument::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document.customers, store.state().customers());
    assert_eq!(document.devices, store.state().devices());
    assert_eq!(document.export_date, export::format_export_date(at));
}

#[tokio::test]
async fn test_deleting_customer_removes_imported_devices() {
    let mut store = InventoryStore::seeded();
    let found = scanner::run_scan(&mut store, &InstantClock, scanner::DEFAULT_STEP_DELAY, None)
        .await
        .unwrap();

    for device in &found {
        store.dispatch(Action::AddScannedDevice(device.clone()));
    }
    assert_eq!(store.state().devices().len(), 6);

    store.dispatch(Action::DeleteCustomer(1));

    let state = store.state();
    assert!(state.devices().iter().all(|d| d.customer_id != 1));
    assert!(state.devices().is_empty());
    assert_eq!(state.customers().len(), 1);
    assert_eq!(state.customers()[0].name, "Finance Inc");

    let csv = export::to_csv(state);
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_form_flow_through_store() {
    let mut store = InventoryStore::seeded();

    store.dispatch(Action::ToggleDeviceForm);
    store.dispatch(Action::EditDeviceDraft(DeviceDraft {
        device_name: "Printer-2F".into(),
        ..Default::default()
    }));
    store.dispatch(Action::SubmitDeviceForm);
    // No customer picked yet
    assert_eq!(store.state().devices().len(), 2);
    assert!(store.state().show_add_device());

    let mut draft = store.state().device_draft().clone();
    draft.customer_id = Some(2);
    store.dispatch(Action::EditDeviceDraft(draft));
    store.dispatch(Action::SubmitDeviceForm);

    assert_eq!(store.state().devices().len(), 3);
    assert!(!store.state().show_add_device());
    assert_eq!(store.state().device_draft(), &DeviceDraft::default());
}

#[test]
fn test_snapshot_with_repeated_ids_is_rejected() {
    let json = r#"{
        "customers": [
            {"id": 1, "name": "Tech Corp", "email": "", "phone": ""},
            {"id": 1, "name": "Copy Corp", "email": "", "phone": ""}
        ],
        "devices": [],
        "exportDate": "2024-03-01T09:30:15.000Z"
    }"#;

    let result = ExportDocument::from_json(json).unwrap().into_state();
    assert!(matches!(
        result,
        Err(InventoryError::DuplicateId { collection: "customer", id: 1 })
    ));
}

#[test]
fn test_snapshot_at_highest_id_is_rejected() {
    let json = r#"{
        "customers": [{"id": 4294967295, "name": "Tech Corp", "email": "", "phone": ""}],
        "devices": [],
        "exportDate": "2024-03-01T09:30:15.000Z"
    }"#;

    let result = ExportDocument::from_json(json).unwrap().into_state();
    assert!(matches!(result, Err(InventoryError::IdsExhausted { .. })));
}

#[test]
fn test_snapshot_session_keeps_ids_unique() {
    let json = r#"{
        "customers": [{"id": 40, "name": "Tech Corp", "email": "", "phone": ""}],
        "devices": [],
        "exportDate": "2024-03-01T09:30:15.000Z"
    }"#;

    let state = ExportDocument::from_json(json).unwrap().into_state().unwrap();
    let mut store = InventoryStore::new(state);
    store.dispatch(Action::AddCustomer(CustomerDraft {
        name: "Harbor Logistics".into(),
        ..Default::default()
    }));

    let ids: Vec<u32> = store.state().customers().iter().map(|c| c.id).collect();
    assert_eq!(ids, [40, 41]);
}
