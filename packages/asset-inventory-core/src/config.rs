//! Runtime configuration.
//!
//! Each setting is resolved with priority:
//! 1. Environment variable
//! 2. Config file (`~/.config/asset-inventory/config.toml`)
//! 3. Default value

use crate::scanner::DEFAULT_STEP_DELAY;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the export directory
pub const ENV_EXPORT_DIR: &str = "ASSET_INVENTORY_EXPORT_DIR";

/// Environment variable overriding the scan step delay, in milliseconds
pub const ENV_SCAN_DELAY_MS: &str = "ASSET_INVENTORY_SCAN_DELAY_MS";

/// Configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    scan: Option<ScanSection>,
    export: Option<ExportSection>,
}

#[derive(Debug, Deserialize, Default)]
struct ScanSection {
    /// Pause before each simulated discovery
    step_delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct ExportSection {
    /// Directory export files are written to
    output_dir: Option<PathBuf>,
}

/// Where a setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Using default hardcoded values
    Default,
    /// Loaded from environment variable
    Environment,
    /// Loaded from config file
    ConfigFile,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::ConfigFile => write!(f, "config file"),
        }
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    pub step_delay: Duration,
    pub step_delay_source: ConfigSource,
    pub export_dir: PathBuf,
    pub export_dir_source: ConfigSource,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            step_delay_source: ConfigSource::Default,
            export_dir: PathBuf::from("."),
            export_dir_source: ConfigSource::Default,
        }
    }
}

/// Get the path to the configuration file
fn get_config_file_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|p| p.join("asset-inventory").join("config.toml"))
}

pub fn parse_config_file(content: &str) -> Result<ConfigFile> {
    toml::from_str(content).context("Failed to parse config file")
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config_file(&content)
}

/// Load the config file, if there is a readable one
fn load_config_file() -> Option<ConfigFile> {
    let path = get_config_file_path()?;

    if !path.exists() {
        return None;
    }

    match read_config_file(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {:?}", path);
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Ignoring config file {:?}: {:#}", path, e);
            None
        }
    }
}

/// Load configuration from the process environment and the config file.
pub fn load_config() -> InventoryConfig {
    resolve_config(|key| std::env::var(key).ok(), load_config_file())
}

/// Resolve settings from an environment lookup and an optional parsed file.
pub fn resolve_config<E>(env: E, file: Option<ConfigFile>) -> InventoryConfig
where
    E: Fn(&str) -> Option<String>,
{
    let mut config = InventoryConfig::default();
    let file = file.unwrap_or_default();

    let env_delay = env(ENV_SCAN_DELAY_MS).and_then(|raw| match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a number of milliseconds", ENV_SCAN_DELAY_MS, raw);
            None
        }
    });

    if let Some(ms) = env_delay {
        config.step_delay = Duration::from_millis(ms);
        config.step_delay_source = ConfigSource::Environment;
    } else if let Some(ms) = file.scan.and_then(|s| s.step_delay_ms) {
        config.step_delay = Duration::from_millis(ms);
        config.step_delay_source = ConfigSource::ConfigFile;
    }

    let env_dir = env(ENV_EXPORT_DIR)
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    if let Some(dir) = env_dir {
        tracing::info!("Using export directory from environment variable: {}", dir);
        config.export_dir = PathBuf::from(dir);
        config.export_dir_source = ConfigSource::Environment;
    } else if let Some(dir) = file
        .export
        .and_then(|e| e.output_dir)
        .filter(|d| !d.as_os_str().is_empty())
    {
        tracing::info!("Using export directory from config file: {}", dir.display());
        config.export_dir = dir;
        config.export_dir_source = ConfigSource::ConfigFile;
    }

    config
}

/// Get the path to the config file for documentation purposes
pub fn get_config_file_path_string() -> String {
    get_config_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/asset-inventory/config.toml".to_string())
}

/// Generate example config file content
pub fn generate_example_config() -> String {
    r#"# Asset Inventory Configuration
# Place this file at: ~/.config/asset-inventory/config.toml

[scan]
# Pause before each simulated discovery, in milliseconds
# Default: 500
# step_delay_ms = 500

[export]
# Directory export files are written to
# Default: current directory
# output_dir = "/home/me/exports"
"#
    .to_string()
}
