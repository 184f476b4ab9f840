//! Demonstration data loaded into a fresh session.

use crate::model::{Customer, Device, DeviceStatus};

pub fn seed_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: 1,
            name: "Tech Corp".to_string(),
            email: "contact@techcorp.com".to_string(),
            phone: "555-0101".to_string(),
        },
        Customer {
            id: 2,
            name: "Finance Inc".to_string(),
            email: "contact@financeinc.com".to_string(),
            phone: "555-0102".to_string(),
        },
    ]
}

pub fn seed_devices() -> Vec<Device> {
    vec![
        Device {
            id: 1,
            device_name: "Desktop-001".to_string(),
            serial_number: "SN-001234".to_string(),
            os_type: "Windows 11".to_string(),
            device_type: "Desktop".to_string(),
            user_name: "john.smith".to_string(),
            ip_address: "192.168.1.10".to_string(),
            customer_id: 1,
            status: DeviceStatus::Deployed,
            manufacturer: "Dell".to_string(),
            model: "OptiPlex 7090".to_string(),
        },
        Device {
            id: 2,
            device_name: "Laptop-002".to_string(),
            serial_number: "SN-005678".to_string(),
            os_type: "macOS 13".to_string(),
            device_type: "Laptop".to_string(),
            user_name: "jane.doe".to_string(),
            ip_address: "192.168.1.20".to_string(),
            customer_id: 1,
            status: DeviceStatus::Deployed,
            manufacturer: "Apple".to_string(),
            model: "MacBook Pro".to_string(),
        },
    ]
}
