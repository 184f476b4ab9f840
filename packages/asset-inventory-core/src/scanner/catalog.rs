//! Scripted discovery results.
//!
//! The simulated scan always "finds" these four devices, in this order.

use crate::model::ScannedDevice;

struct Entry {
    ip: &'static str,
    device_name: &'static str,
    serial_number: &'static str,
    os_type: &'static str,
    device_type: &'static str,
    user_name: &'static str,
    manufacturer: &'static str,
    model: &'static str,
}

const ENTRIES: [Entry; 4] = [
    Entry {
        ip: "192.168.1.5",
        device_name: "Firewall-Main",
        serial_number: "FW-2024-001",
        os_type: "Cisco IOS",
        device_type: "Firewall",
        user_name: "admin",
        manufacturer: "Cisco",
        model: "ASA5506-X",
    },
    Entry {
        ip: "192.168.1.10",
        device_name: "Printer-Office",
        serial_number: "PR-HP-2024",
        os_type: "Linux",
        device_type: "Printer",
        user_name: "print_admin",
        manufacturer: "HP",
        model: "LaserJet Pro M404n",
    },
    Entry {
        ip: "192.168.1.15",
        device_name: "Switch-Core",
        serial_number: "SW-CORE-001",
        os_type: "Catalyst OS",
        device_type: "Network Switch",
        user_name: "network_admin",
        manufacturer: "Cisco",
        model: "Catalyst 3850",
    },
    Entry {
        ip: "192.168.1.25",
        device_name: "Desktop-Sales",
        serial_number: "SN-DELL-2024",
        os_type: "Windows 11 Pro",
        device_type: "Desktop",
        user_name: "sales_user",
        manufacturer: "Dell",
        model: "Optiplex 7950",
    },
];

/// The devices a simulated scan reports, in discovery order.
pub fn catalog() -> Vec<ScannedDevice> {
    ENTRIES
        .iter()
        .map(|e| ScannedDevice {
            ip: e.ip.to_string(),
            device_name: e.device_name.to_string(),
            serial_number: e.serial_number.to_string(),
            os_type: e.os_type.to_string(),
            device_type: e.device_type.to_string(),
            user_name: e.user_name.to_string(),
            manufacturer: e.manufacturer.to_string(),
            model: e.model.to_string(),
        })
        .collect()
}
