//! Terminal views of the inventory, one per tab.

use crate::OutputFormat;
use asset_inventory_core::aggregates::{self, customer_name};
use asset_inventory_core::{Device, DeviceFilter, GroupCount, InventoryState, ScannedDevice, Tab};
use serde::Serialize;
use std::path::Path;

/// Device as listed to the user, with its customer resolved
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceRow<'a> {
    #[serde(flatten)]
    device: &'a Device,
    customer_name: &'a str,
}

pub fn render_tab(state: &InventoryState, tab: Tab, format: OutputFormat) {
    match tab {
        Tab::Dashboard => print_dashboard(state, format),
        Tab::Customers => print_customers(state, format),
        Tab::Devices => print_devices(state, format),
        Tab::Network => print_scan_results(state, format),
        Tab::Reports => print_reports(state, format),
    }
}

fn print_groups(title: &str, groups: &[GroupCount]) {
    println!("{}", title);
    if groups.is_empty() {
        println!("  (none)");
    }
    for group in groups {
        println!("  {:<24} {:>4}", group.key, group.count);
    }
}

pub fn print_dashboard(state: &InventoryState, format: OutputFormat) {
    let summary = aggregates::summarize(state);

    match format {
        OutputFormat::Text => {
            println!(
                "Total Devices: {}   Deployed: {}   Stock: {}   Customers: {}",
                summary.total_devices,
                summary.devices_deployed,
                summary.devices_stock,
                summary.total_customers
            );
            println!();
            print_groups("By Type", &summary.devices_by_type);
            println!();
            print_groups("By OS", &summary.os_by_type);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::json!(summary));
        }
    }
}

pub fn print_customers(state: &InventoryState, format: OutputFormat) {
    let summaries = aggregates::customer_summaries(state);

    match format {
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("No customers.");
                return;
            }
            for c in &summaries {
                println!("[{}] {}", c.customer_id, c.name);
                println!("    {}  {}", c.email, c.phone);
                println!(
                    "    Deployed: {}  Stock: {}  Total: {}",
                    c.deployed, c.stock, c.total
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "customers": summaries }));
        }
    }
}

pub fn print_devices(state: &InventoryState, format: OutputFormat) {
    let visible = aggregates::visible_devices(state);

    match format {
        OutputFormat::Text => {
            let summary = aggregates::summarize(state);
            let marker = |f: DeviceFilter| if state.device_filter() == f { "*" } else { " " };
            println!(
                "{}All ({})  {}Deployed ({})  {}Stock ({})",
                marker(DeviceFilter::All),
                summary.total_devices,
                marker(DeviceFilter::Deployed),
                summary.devices_deployed,
                marker(DeviceFilter::Stock),
                summary.devices_stock
            );
            println!();
            if visible.is_empty() {
                println!("No devices.");
                return;
            }
            println!(
                "{:>4}  {:<16} {:<12} {:<10} {:<18} {:<14} {:<14} {:<12} {:<15} {:<8} {}",
                "ID", "Device", "Serial", "Mfg", "Model", "OS", "Type", "User", "IP", "Status", "Customer"
            );
            for d in visible {
                println!(
                    "{:>4}  {:<16} {:<12} {:<10} {:<18} {:<14} {:<14} {:<12} {:<15} {:<8} {}",
                    d.id,
                    d.device_name,
                    d.serial_number,
                    d.manufacturer,
                    d.model,
                    d.os_type,
                    d.device_type,
                    d.user_name,
                    d.ip_address,
                    d.status,
                    customer_name(state, d.customer_id)
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<DeviceRow> = visible
                .into_iter()
                .map(|device| DeviceRow {
                    device,
                    customer_name: customer_name(state, device.customer_id),
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "filter": state.device_filter(),
                    "devices": rows,
                })
            );
        }
    }
}

pub fn print_scanned(scanned: &[ScannedDevice]) {
    println!("Found {} devices:", scanned.len());
    println!();
    println!(
        "  {:>2}  {:<16} {:<15} {:<13} {:<8} {:<20} {:<15} {}",
        "#", "Device", "IP", "Serial", "Mfg", "Model", "OS", "Type"
    );
    for (idx, d) in scanned.iter().enumerate() {
        println!(
            "  {:>2}  {:<16} {:<15} {:<13} {:<8} {:<20} {:<15} {}",
            idx + 1,
            d.device_name,
            d.ip,
            d.serial_number,
            d.manufacturer,
            d.model,
            d.os_type,
            d.device_type
        );
    }
}

pub fn print_scan_results(state: &InventoryState, format: OutputFormat) {
    let scan = state.scan();

    match format {
        OutputFormat::Text => {
            if scan.in_progress {
                println!("Scanning... {}%", scan.progress);
            }
            if scan.scanned.is_empty() {
                println!("No scan results yet. Run 'scan' to discover devices.");
            } else {
                print_scanned(&scan.scanned);
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "scanning": scan.in_progress,
                    "progress": scan.progress,
                    "devices": scan.scanned,
                })
            );
        }
    }
}

pub fn print_reports(state: &InventoryState, format: OutputFormat) {
    let summary = aggregates::summarize(state);

    match format {
        OutputFormat::Text => {
            println!("Summary");
            println!("=======");
            println!("Customers: {}", summary.total_customers);
            println!("Total:     {}", summary.total_devices);
            println!("Deployed:  {}", summary.devices_deployed);
            println!("Stock:     {}", summary.devices_stock);
            println!();
            println!("Export with: export json | export csv");
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "customers": summary.total_customers,
                    "total": summary.total_devices,
                    "deployed": summary.devices_deployed,
                    "stock": summary.devices_stock,
                })
            );
        }
    }
}

pub fn print_imported(device: &Device, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!(
            "Added {} ({}) to inventory as device {}",
            device.device_name, device.ip_address, device.id
        ),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "status": "imported", "device": device })
        ),
    }
}

pub fn print_export_written(path: &Path, kind: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{} export written to {}", kind, path.display()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "status": "exported", "format": kind, "path": path })
        ),
    }
}
