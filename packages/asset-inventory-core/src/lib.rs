//! Asset Inventory Core Library
//!
//! This crate provides the core functionality for the asset inventory:
//! - Customer and device records with a reducer-driven state store
//! - Dashboard aggregates (status counts, breakdowns by type and OS)
//! - Simulated network scan producing importable device records
//! - JSON and CSV export
//!
//! # Example
//!
//! ```no_run
//! use asset_inventory_core::{export, scanner, Action, InventoryStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut store = InventoryStore::seeded();
//!
//!     // Run the simulated scan and import the first result
//!     let found = scanner::run_scan(
//!         &mut store,
//!         &scanner::TokioClock,
//!         scanner::DEFAULT_STEP_DELAY,
//!         None,
//!     )
//!     .await?;
//!     store.dispatch(Action::AddScannedDevice(found[0].clone()));
//!
//!     // Export as CSV
//!     println!("{}", export::to_csv(store.state()));
//!
//!     Ok(())
//! }
//! ```

pub mod aggregates;
pub mod config;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod model;
pub mod scanner;
pub mod store;

// Re-export commonly used types
pub use aggregates::{CustomerSummary, GroupCount, Summary};
pub use config::{load_config, ConfigSource, InventoryConfig};
pub use error::InventoryError;
pub use export::{ExportDocument, ExportFormat};
pub use model::{
    Customer, CustomerDraft, CustomerId, Device, DeviceDraft, DeviceId, DeviceStatus,
    ScannedDevice,
};
pub use scanner::{ProgressCallback, ScanProgress, ScanStage, ScanStep};
pub use store::{Action, DeviceFilter, InventoryState, InventoryStore, ScanState, Tab};
