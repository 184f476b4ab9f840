//! Simulated network scanning.
//!
//! No packets leave the machine: a scan walks a fixed catalog of four
//! devices, pausing between each one so the progress display has something
//! to show. The walk is split in three layers:
//! - [`ScanSimulator`]: finite iterator yielding one [`ScanStep`] per device
//! - [`scan_stream`]: the same steps, paced by a [`ScanClock`]
//! - [`run_scan`]: applies the steps to an [`InventoryStore`] and reports
//!   progress

mod catalog;
mod clock;

pub use catalog::catalog;
pub use clock::{InstantClock, ScanClock, TokioClock};

use crate::error::InventoryError;
use crate::model::ScannedDevice;
use crate::store::{Action, InventoryStore};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Pause before each discovered device
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

/// Progress updates during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanProgress {
    pub stage: ScanStage,
    pub message: String,
    pub percent: Option<u8>,
    pub devices_found: Option<usize>,
    pub elapsed_secs: f64,
}

/// Stages of the scan process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    Starting,
    Discovering,
    Complete,
}

/// Callback type for scan progress updates
pub type ProgressCallback = Box<dyn Fn(ScanProgress) + Send + Sync>;

/// One device surfacing during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStep {
    /// Zero-based position in the catalog
    pub index: usize,
    pub total: usize,
    /// Progress reported alongside this device
    pub progress: u8,
    pub device: ScannedDevice,
}

/// Progress value shown when the device at `index` appears.
///
/// Computed from the number of devices found *before* this one, so a
/// four-device scan reports 0, 25, 50, 75 and only reaches 100 when the scan
/// finishes.
pub fn step_progress(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((index as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

/// Finite sequence of scan steps over a device catalog.
#[derive(Debug, Clone)]
pub struct ScanSimulator {
    devices: Vec<ScannedDevice>,
    next: usize,
}

impl Default for ScanSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSimulator {
    /// Simulator over the built-in catalog
    pub fn new() -> Self {
        Self::with_devices(catalog())
    }

    pub fn with_devices(devices: Vec<ScannedDevice>) -> Self {
        Self { devices, next: 0 }
    }

    pub fn total(&self) -> usize {
        self.devices.len()
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.devices.len()
    }
}

impl Iterator for ScanSimulator {
    type Item = ScanStep;

    fn next(&mut self) -> Option<ScanStep> {
        let device = self.devices.get(self.next)?.clone();
        let step = ScanStep {
            index: self.next,
            total: self.devices.len(),
            progress: step_progress(self.next, self.devices.len()),
            device,
        };
        self.next += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.devices.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

/// Yield the simulator's steps, waiting `step_delay` on `clock` before each.
pub fn scan_stream<'a, C: ScanClock + Sync>(
    simulator: ScanSimulator,
    clock: &'a C,
    step_delay: Duration,
) -> impl Stream<Item = ScanStep> + 'a {
    futures::stream::unfold(simulator, move |mut simulator| async move {
        let step = simulator.next()?;
        clock.wait(step_delay).await;
        Some((step, simulator))
    })
}

/// Run a full simulated scan against the store.
///
/// Fails with [`InventoryError::ScanInProgress`] if the store already shows a
/// running scan. Once started the scan always runs to completion, leaving
/// progress at 100 and the scanned list holding every catalog device.
pub async fn run_scan<C: ScanClock + Sync>(
    store: &mut InventoryStore,
    clock: &C,
    step_delay: Duration,
    on_progress: Option<ProgressCallback>,
) -> Result<Vec<ScannedDevice>, InventoryError> {
    if store.state().scan().in_progress {
        tracing::warn!("Scan requested while another scan is running");
        return Err(InventoryError::ScanInProgress);
    }

    let scan_start = Instant::now();

    let emit_progress =
        |stage: ScanStage, message: &str, percent: Option<u8>, devices: Option<usize>| {
            let progress = ScanProgress {
                stage,
                message: message.to_string(),
                percent,
                devices_found: devices,
                elapsed_secs: scan_start.elapsed().as_secs_f64(),
            };
            tracing::info!("[Scan] {}", message);
            if let Some(ref callback) = on_progress {
                callback(progress);
            }
        };

    store.dispatch(Action::ScanStarted);

    let simulator = ScanSimulator::new();
    emit_progress(
        ScanStage::Starting,
        &format!("Scanning network for {} known device profiles...", simulator.total()),
        Some(0),
        Some(0),
    );

    let steps = scan_stream(simulator, clock, step_delay);
    let mut steps = std::pin::pin!(steps);

    while let Some(step) = steps.next().await {
        let message = format!(
            "Found {} at {} ({}/{})",
            step.device.device_name,
            step.device.ip,
            step.index + 1,
            step.total
        );
        let found = step.index + 1;
        let percent = step.progress;

        store.dispatch(Action::ScanStep {
            progress: step.progress,
            device: step.device,
        });
        emit_progress(ScanStage::Discovering, &message, Some(percent), Some(found));
    }

    store.dispatch(Action::ScanFinished);

    let scanned = store.state().scan().scanned.clone();
    emit_progress(
        ScanStage::Complete,
        &format!(
            "Scan complete: {} devices found in {:.1}s",
            scanned.len(),
            scan_start.elapsed().as_secs_f64()
        ),
        Some(100),
        Some(scanned.len()),
    );

    Ok(scanned)
}
