//! Interactive shell over a single in-memory inventory session.
//!
//! Every line is parsed as a command and applied to the same store, so
//! customers added, devices imported or filters chosen persist until the
//! shell exits. Nothing is written to disk except explicit exports.

use crate::{render, session, OutputFormat};
use anyhow::{Context, Result};
use asset_inventory_core::{
    Action, CustomerDraft, CustomerId, DeviceDraft, DeviceFilter, DeviceId, DeviceStatus,
    ExportFormat, InventoryConfig, InventoryStore, Tab,
};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Switch to a tab (dashboard, customers, devices, network, reports)
    Tab { name: Tab },

    /// Show the dashboard
    Dashboard,

    /// List customers with their device counts
    Customers,

    /// List devices matching the current filter
    Devices,

    /// Show results of the last scan
    #[command(alias = "network")]
    Found,

    /// Show the summary report
    Reports,

    /// Filter the device list (all, deployed, stock)
    Filter { filter: DeviceFilter },

    /// Add or delete customers
    #[command(subcommand)]
    Customer(CustomerCommand),

    /// Add or delete devices
    #[command(subcommand)]
    Device(DeviceCommand),

    /// Run the simulated network scan
    Scan,

    /// Add scan results to the inventory, by number or "all"
    Import { target: String },

    /// Write an export file (json or csv)
    Export {
        format: ExportFormat,

        /// Directory to write into instead of the configured one
        output: Option<PathBuf>,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum CustomerCommand {
    /// Add a customer
    Add {
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Delete a customer and every device it owns
    Delete { id: CustomerId },
}

#[derive(Subcommand, Debug)]
enum DeviceCommand {
    /// Add a device
    Add {
        name: String,
        /// Owning customer id
        #[arg(long)]
        customer: Option<CustomerId>,
        #[arg(long, default_value = "")]
        serial: String,
        #[arg(long, default_value = "")]
        os: String,
        #[arg(long = "type", default_value = "")]
        device_type: String,
        #[arg(long, default_value = "")]
        user: String,
        #[arg(long, default_value = "")]
        ip: String,
        #[arg(long, default_value = "")]
        manufacturer: String,
        #[arg(long, default_value = "")]
        model: String,
        /// deployed or stock
        #[arg(long, default_value = "stock")]
        status: DeviceStatus,
    },
    /// Delete a device
    Delete { id: DeviceId },
}

enum Flow {
    Continue,
    Quit,
}

/// Split a line into words. Single or double quotes group words, and a
/// backslash outside quotes escapes the next character.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_token = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                        in_token = true;
                    }
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn prompt(tab: Tab) -> Result<()> {
    print!("{}> ", tab.title().to_ascii_lowercase());
    std::io::stdout().flush().context("Failed to write prompt")
}

/// Read commands from stdin until `quit`, end of input or Ctrl+C.
pub async fn run_shell(
    store: &mut InventoryStore,
    config: &InventoryConfig,
    format: OutputFormat,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Asset Inventory shell. Type 'help' for commands, 'quit' to leave.");
    render::render_tab(store.state(), store.state().active_tab(), format);

    loop {
        prompt(store.state().active_tab())?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, leaving shell");
                println!();
                break;
            }
        };

        let Some(line) = line else {
            println!();
            break;
        };

        let tokens = match split_line(&line) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };
        if tokens.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Help and usage errors are both reported by clap itself
                let _ = e.print();
                continue;
            }
        };

        match execute(store, config, format, parsed.command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    tracing::debug!("Shell closed");
    Ok(())
}

fn show(store: &mut InventoryStore, tab: Tab, format: OutputFormat) {
    let state = store.dispatch(Action::SelectTab(tab));
    render::render_tab(state, tab, format);
}

async fn execute(
    store: &mut InventoryStore,
    config: &InventoryConfig,
    format: OutputFormat,
    command: ShellCommand,
) -> Result<Flow> {
    match command {
        ShellCommand::Tab { name } => show(store, name, format),
        ShellCommand::Dashboard => show(store, Tab::Dashboard, format),
        ShellCommand::Customers => show(store, Tab::Customers, format),
        ShellCommand::Devices => show(store, Tab::Devices, format),
        ShellCommand::Found => show(store, Tab::Network, format),
        ShellCommand::Reports => show(store, Tab::Reports, format),
        ShellCommand::Filter { filter } => {
            store.dispatch(Action::SetDeviceFilter(filter));
            show(store, Tab::Devices, format);
        }
        ShellCommand::Customer(action) => customer_command(store, action, format),
        ShellCommand::Device(action) => device_command(store, action, format),
        ShellCommand::Scan => {
            session::scan(store, config, format).await?;
            if let OutputFormat::Text = format {
                println!();
            }
            render::print_scan_results(store.state(), format);
        }
        ShellCommand::Import { target } => import_command(store, &target, format)?,
        ShellCommand::Export { format: kind, output } => {
            let path = session::export(store, config, kind, output.as_deref())?;
            render::print_export_written(&path, &kind.to_string(), format);
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn customer_command(store: &mut InventoryStore, command: CustomerCommand, format: OutputFormat) {
    match command {
        CustomerCommand::Add { name, email, phone } => {
            if !store.state().show_add_customer() {
                store.dispatch(Action::ToggleCustomerForm);
            }
            store.dispatch(Action::EditCustomerDraft(CustomerDraft { name, email, phone }));
            let next_id = store.state().next_customer_id();
            let state = store.dispatch(Action::SubmitCustomerForm);

            if state.show_add_customer() {
                eprintln!("Customer not added: a name is required");
                store.dispatch(Action::CancelCustomerForm);
                return;
            }
            if let Some(customer) = state.customer(next_id) {
                match format {
                    OutputFormat::Text => {
                        println!("Added customer {} ({})", customer.name, customer.id)
                    }
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({ "status": "added", "customer": customer })
                    ),
                }
            }
        }
        CustomerCommand::Delete { id } => {
            let Some(name) = store.state().customer(id).map(|c| c.name.clone()) else {
                eprintln!("No customer with id {}", id);
                return;
            };
            let before = store.state().devices().len();
            let after = store.dispatch(Action::DeleteCustomer(id)).devices().len();
            let removed = before - after;

            match format {
                OutputFormat::Text => println!(
                    "Deleted customer {} and {} of its devices",
                    name, removed
                ),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "status": "deleted",
                        "customerId": id,
                        "devicesRemoved": removed,
                    })
                ),
            }
        }
    }
}

fn device_command(store: &mut InventoryStore, command: DeviceCommand, format: OutputFormat) {
    match command {
        DeviceCommand::Add {
            name,
            customer,
            serial,
            os,
            device_type,
            user,
            ip,
            manufacturer,
            model,
            status,
        } => {
            if !store.state().show_add_device() {
                store.dispatch(Action::ToggleDeviceForm);
            }
            store.dispatch(Action::EditDeviceDraft(DeviceDraft {
                device_name: name,
                serial_number: serial,
                os_type: os,
                device_type,
                user_name: user,
                ip_address: ip,
                customer_id: customer,
                status,
                manufacturer,
                model,
            }));
            let next_id = store.state().next_device_id();
            let state = store.dispatch(Action::SubmitDeviceForm);

            if state.show_add_device() {
                eprintln!("Device not added: a name and --customer are required");
                store.dispatch(Action::CancelDeviceForm);
                return;
            }
            if let Some(device) = state.device(next_id) {
                match format {
                    OutputFormat::Text => println!(
                        "Added device {} ({}) for customer {}",
                        device.device_name, device.id, device.customer_id
                    ),
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({ "status": "added", "device": device })
                    ),
                }
            }
        }
        DeviceCommand::Delete { id } => {
            if store.state().device(id).is_none() {
                eprintln!("No device with id {}", id);
                return;
            }
            store.dispatch(Action::DeleteDevice(id));
            match format {
                OutputFormat::Text => println!("Deleted device {}", id),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "status": "deleted", "deviceId": id })
                ),
            }
        }
    }
}

fn import_command(store: &mut InventoryStore, target: &str, format: OutputFormat) -> Result<()> {
    let scanned = store.state().scan().scanned.clone();
    if scanned.is_empty() {
        anyhow::bail!("Nothing to import, run 'scan' first");
    }

    let picked = if target.eq_ignore_ascii_case("all") {
        scanned
    } else {
        let index: usize = target
            .parse()
            .with_context(|| format!("Expected a result number or 'all', got '{}'", target))?;
        match index.checked_sub(1).and_then(|i| scanned.get(i)) {
            Some(device) => vec![device.clone()],
            None => anyhow::bail!("No scan result #{} (found {})", index, scanned.len()),
        }
    };

    for device in &picked {
        if let Some(imported) = session::import(store, device) {
            render::print_imported(&imported, format);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_plain_words() {
        assert_eq!(
            split_line("  filter   deployed ").unwrap(),
            vec!["filter", "deployed"]
        );
        assert!(split_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_line_quotes_and_escapes() {
        assert_eq!(
            split_line(r#"customer add "Harbor Logistics" --email 'ops@harbor.io'"#).unwrap(),
            vec!["customer", "add", "Harbor Logistics", "--email", "ops@harbor.io"]
        );
        assert_eq!(split_line(r"device add Rack\ 4").unwrap(), vec!["device", "add", "Rack 4"]);
        assert_eq!(split_line(r#"customer add """#).unwrap(), vec!["customer", "add", ""]);
    }

    #[test]
    fn test_split_line_unterminated_quote() {
        assert!(split_line(r#"customer add "Harbor"#).is_err());
    }

    #[test]
    fn test_parse_device_add() {
        let line = ShellLine::try_parse_from([
            "device", "add", "Laptop-9", "--customer", "2", "--type", "Laptop", "--status",
            "deployed",
        ])
        .unwrap();

        match line.command {
            ShellCommand::Device(DeviceCommand::Add {
                name,
                customer,
                device_type,
                status,
                serial,
                ..
            }) => {
                assert_eq!(name, "Laptop-9");
                assert_eq!(customer, Some(2));
                assert_eq!(device_type, "Laptop");
                assert_eq!(status, DeviceStatus::Deployed);
                assert_eq!(serial, "");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_aliases_and_values() {
        let line = ShellLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Quit));

        let line = ShellLine::try_parse_from(["tab", "scan"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Tab { name: Tab::Network }));

        let line = ShellLine::try_parse_from(["export", "csv", "/tmp/out"]).unwrap();
        match line.command {
            ShellCommand::Export { format, output } => {
                assert_eq!(format, ExportFormat::Csv);
                assert_eq!(output, Some(PathBuf::from("/tmp/out")));
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(ShellLine::try_parse_from(["filter", "retired"]).is_err());
    }

    #[test]
    fn test_customer_add_rejects_blank_name() {
        let mut store = InventoryStore::seeded();
        let before = store.state().customers().len();

        customer_command(
            &mut store,
            CustomerCommand::Add {
                name: "  ".into(),
                email: String::new(),
                phone: String::new(),
            },
            OutputFormat::Json,
        );

        assert_eq!(store.state().customers().len(), before);
        assert!(!store.state().show_add_customer());
    }

    #[test]
    fn test_import_by_number() {
        let mut store = InventoryStore::seeded();
        for (idx, device) in asset_inventory_core::scanner::catalog().into_iter().enumerate() {
            store.dispatch(Action::ScanStarted);
            store.dispatch(Action::ScanStep {
                progress: (idx * 25) as u8,
                device,
            });
        }
        store.dispatch(Action::ScanFinished);

        import_command(&mut store, "2", OutputFormat::Json).unwrap();
        let added = store.state().devices().last().unwrap();
        assert_eq!(added.device_name, "Printer-Office");

        assert!(import_command(&mut store, "9", OutputFormat::Json).is_err());
        assert!(import_command(&mut store, "two", OutputFormat::Json).is_err());
    }
}
