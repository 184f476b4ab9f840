//! JSON and CSV export of the inventory.
//!
//! Exports are written as `asset-inventory-<epoch-millis>.<ext>` into a
//! target directory. JSON documents can be read back with
//! [`ExportDocument::from_json`] to start a new session from a previous
//! export.

use crate::aggregates::customer_name;
use crate::error::InventoryError;
use crate::model::{Customer, Device};
use crate::store::InventoryState;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "asset-inventory";

pub const CSV_HEADER: &str = "Customer,Device,Serial,Manufacturer,Model,OS,Type,User,IP,Status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// Full JSON export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub customers: Vec<Customer>,
    pub devices: Vec<Device>,
    /// ISO-8601 UTC timestamp, millisecond precision
    pub export_date: String,
}

impl ExportDocument {
    pub fn from_state(state: &InventoryState, at: DateTime<Utc>) -> Self {
        Self {
            customers: state.customers().to_vec(),
            devices: state.devices().to_vec(),
            export_date: format_export_date(at),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, InventoryError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Start a fresh session holding the exported collections.
    ///
    /// Fails if either collection repeats an id or has no id left to hand out.
    pub fn into_state(self) -> Result<InventoryState, InventoryError> {
        InventoryState::from_collections(self.customers, self.devices)
    }
}

/// Timestamp in the `2024-05-01T12:30:00.000Z` form
pub fn format_export_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn to_json(state: &InventoryState, at: DateTime<Utc>) -> Result<String, InventoryError> {
    let document = ExportDocument::from_state(state, at);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Wrap a field in double quotes, doubling any quotes it contains.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One header line plus one line per device, in collection order.
pub fn to_csv(state: &InventoryState) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + state.devices().len() * 128);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for device in state.devices() {
        let fields: [&str; 10] = [
            customer_name(state, device.customer_id),
            &device.device_name,
            &device.serial_number,
            &device.manufacturer,
            &device.model,
            &device.os_type,
            &device.device_type,
            &device.user_name,
            &device.ip_address,
            device.status.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

pub fn export_file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!("{}-{}.{}", FILE_PREFIX, at.timestamp_millis(), format.extension())
}

pub fn render(
    format: ExportFormat,
    state: &InventoryState,
    at: DateTime<Utc>,
) -> Result<String, InventoryError> {
    match format {
        ExportFormat::Json => to_json(state, at),
        ExportFormat::Csv => Ok(to_csv(state)),
    }
}

/// Write an export into `dir`, creating it if needed. Returns the file path.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    state: &InventoryState,
    at: DateTime<Utc>,
) -> Result<PathBuf, InventoryError> {
    let content = render(format, state, at)?;

    std::fs::create_dir_all(dir).map_err(|source| InventoryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(format, at));
    std::fs::write(&path, content).map_err(|source| InventoryError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        "Exported {} customers and {} devices to {}",
        state.customers().len(),
        state.devices().len(),
        path.display()
    );

    Ok(path)
}
