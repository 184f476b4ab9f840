//! Operations shared by one-shot commands and the interactive shell.

use crate::OutputFormat;
use anyhow::{Context, Result};
use asset_inventory_core::export::{self, ExportDocument};
use asset_inventory_core::scanner::{self, TokioClock};
use asset_inventory_core::{
    Action, Device, ExportFormat, InventoryConfig, InventoryState, InventoryStore, ScanProgress,
    ScannedDevice,
};
use std::path::{Path, PathBuf};

/// Start from a previous JSON export, or from the demo data.
pub fn load_initial_state(snapshot: Option<&Path>) -> Result<InventoryState> {
    let Some(path) = snapshot else {
        return Ok(InventoryState::seeded());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let document = ExportDocument::from_json(&content)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    tracing::info!(
        "Loaded snapshot from {}: {} customers, {} devices (exported {})",
        path.display(),
        document.customers.len(),
        document.devices.len(),
        document.export_date
    );

    document
        .into_state()
        .with_context(|| format!("Snapshot {} is not a usable inventory", path.display()))
}

/// Run the simulated scan, printing a progress line per step in text mode.
pub async fn scan(
    store: &mut InventoryStore,
    config: &InventoryConfig,
    format: OutputFormat,
) -> Result<Vec<ScannedDevice>> {
    store.dispatch(Action::SelectTab(asset_inventory_core::Tab::Network));

    let progress_callback: Option<scanner::ProgressCallback> = match format {
        OutputFormat::Text => Some(Box::new(|progress: ScanProgress| {
            if let Some(pct) = progress.percent {
                println!("  [{:>3}%] {}", pct, progress.message);
            } else {
                println!("  {}", progress.message);
            }
        })),
        OutputFormat::Json => None,
    };

    let found = scanner::run_scan(store, &TokioClock, config.step_delay, progress_callback)
        .await
        .context("Scan failed")?;

    Ok(found)
}

/// Add one scan result to the inventory and return the new device.
pub fn import(store: &mut InventoryStore, scanned: &ScannedDevice) -> Option<Device> {
    let next_id = store.state().next_device_id();
    store.dispatch(Action::AddScannedDevice(scanned.clone()));
    store.state().device(next_id).cloned()
}

/// Write an export into `output`, or the configured directory.
pub fn export(
    store: &mut InventoryStore,
    config: &InventoryConfig,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<PathBuf> {
    store.dispatch(Action::SelectTab(asset_inventory_core::Tab::Reports));

    let dir = output.unwrap_or(&config.export_dir);
    let path = export::write_export(dir, format, store.state(), chrono::Utc::now())
        .with_context(|| format!("Failed to write {} export", format))?;

    Ok(path)
}
