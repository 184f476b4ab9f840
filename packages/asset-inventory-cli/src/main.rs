//! Asset Inventory CLI - Track customer devices from the terminal
//!
//! This binary provides a terminal front end for the inventory that can:
//! - Show the dashboard, customers, devices and reports
//! - Run the simulated network scan and import what it finds
//! - Export the inventory as JSON or CSV
//! - Keep an interactive session open with `shell`

mod render;
mod session;
mod shell;

use anyhow::Result;
use asset_inventory_core::{
    config, Action, DeviceFilter, ExportFormat, InventoryConfig, InventoryStore, ScannedDevice,
    Tab,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asset-inventory")]
#[command(author = "Stratiform LLC")]
#[command(version)]
#[command(about = "Track customers and their devices, simulate scans, export reports")]
#[command(long_about = "
Asset Inventory keeps a list of customers and the devices deployed at their
sites or held in stock. Each run starts from the demo data, or from a
previous JSON export given with --snapshot.

Quick start:
  1. Overview:          asset-inventory dashboard
  2. Find devices:      asset-inventory scan --add-all
  3. Export:            asset-inventory export csv
  4. Work interactively: asset-inventory shell
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Start from a JSON export instead of the demo data
    #[arg(short, long, global = true, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show device totals and breakdowns by type and OS
    Dashboard,

    /// List customers with their device counts
    Customers,

    /// List devices
    Devices {
        /// Only show devices with this status (all, deployed, stock)
        #[arg(long, default_value = "all")]
        filter: DeviceFilter,
    },

    /// Run the simulated network scan
    Scan {
        /// Add the scanned device with this name to the inventory
        #[arg(short, long, value_name = "NAME")]
        add: Vec<String>,

        /// Add every scanned device to the inventory
        #[arg(long, conflicts_with = "add")]
        add_all: bool,
    },

    /// Write the inventory to a file (json or csv)
    Export {
        format: ExportFormat,

        /// Directory to write into (defaults to the configured export directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show the summary report
    Reports,

    /// Start an interactive session
    #[command(alias = "repl")]
    Shell,

    /// Show configuration paths and settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays parseable
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "asset_inventory={},asset_inventory_core={}",
                    log_level, log_level
                )
                .into()
            }),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config();
    let state = session::load_initial_state(cli.snapshot.as_deref())?;
    let mut store = InventoryStore::new(state);

    match &cli.command {
        Commands::Dashboard => cmd_show(&cli, &mut store, Tab::Dashboard),
        Commands::Customers => cmd_show(&cli, &mut store, Tab::Customers),
        Commands::Devices { filter } => {
            store.dispatch(Action::SetDeviceFilter(*filter));
            cmd_show(&cli, &mut store, Tab::Devices)
        }
        Commands::Reports => cmd_show(&cli, &mut store, Tab::Reports),
        Commands::Scan { add, add_all } => cmd_scan(&cli, &mut store, &config, add, *add_all).await,
        Commands::Export { format, output } => {
            cmd_export(&cli, &mut store, &config, *format, output.as_deref())
        }
        Commands::Shell => shell::run_shell(&mut store, &config, cli.format).await,
        Commands::Config => cmd_config(&cli, &config),
    }
}

fn cmd_show(cli: &Cli, store: &mut InventoryStore, tab: Tab) -> Result<()> {
    let state = store.dispatch(Action::SelectTab(tab));
    render::render_tab(state, tab, cli.format);
    Ok(())
}

async fn cmd_scan(
    cli: &Cli,
    store: &mut InventoryStore,
    config: &InventoryConfig,
    add: &[String],
    add_all: bool,
) -> Result<()> {
    match cli.format {
        OutputFormat::Text => println!("Scanning network..."),
        OutputFormat::Json => {}
    }

    let found = session::scan(store, config, cli.format).await?;

    let picked: Vec<&ScannedDevice> = if add_all {
        found.iter().collect()
    } else {
        let mut picked = Vec::new();
        for name in add {
            match found.iter().find(|d| d.device_name.eq_ignore_ascii_case(name)) {
                Some(device) => picked.push(device),
                None => eprintln!("No scanned device named '{}'", name),
            }
        }
        picked
    };

    let imported: Vec<_> = picked
        .into_iter()
        .filter_map(|device| session::import(store, device))
        .collect();

    match cli.format {
        OutputFormat::Text => {
            println!();
            render::print_scanned(&found);
            if !imported.is_empty() {
                println!();
                for device in &imported {
                    render::print_imported(device, cli.format);
                }
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "devices": found,
                    "imported": imported,
                })
            );
        }
    }

    Ok(())
}

fn cmd_export(
    cli: &Cli,
    store: &mut InventoryStore,
    config: &InventoryConfig,
    format: ExportFormat,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let path = session::export(store, config, format, output)?;
    render::print_export_written(&path, &format.to_string(), cli.format);
    Ok(())
}

fn cmd_config(cli: &Cli, config: &InventoryConfig) -> Result<()> {
    let config_path = config::get_config_file_path_string();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration");
            println!("=============");
            println!();
            println!("Config file:      {}", config_path);
            println!(
                "Scan step delay:  {}ms (from {})",
                config.step_delay.as_millis(),
                config.step_delay_source
            );
            println!(
                "Export directory: {} (from {})",
                config.export_dir.display(),
                config.export_dir_source
            );
            println!();
            println!("Environment variables:");
            println!(
                "  {} - Override the scan step delay (milliseconds)",
                config::ENV_SCAN_DELAY_MS
            );
            println!("  {} - Override the export directory", config::ENV_EXPORT_DIR);
            println!();
            println!("Example config.toml:");
            println!();
            print!("{}", config::generate_example_config());
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path,
                    "step_delay_ms": config.step_delay.as_millis() as u64,
                    "step_delay_source": config.step_delay_source.to_string(),
                    "export_dir": config.export_dir,
                    "export_dir_source": config.export_dir_source.to_string(),
                })
            );
        }
    }

    Ok(())
}
