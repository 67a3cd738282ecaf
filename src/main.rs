//! sworks - command-line client for the SecureWorks ticket SOAP API
//!
//! # Configuration
//!
//! Credentials come from an XML file passed with `-c` (or `SWORKS_CONFIG`),
//! or from `SWORKS_USERNAME`, `SWORKS_PASSWORD`, `SWORKS_CLIENT_ID`,
//! `SWORKS_LOCATION_ID` and `SWORKS_API_URI` (a `.env` file is honoured).
//!
//! # Usage
//!
//! ```bash
//! sworks -c sworks.xml ticket -t INC-12345 -L
//! sworks -c sworks.xml queue-ids -t INCIDENT -l 50
//! sworks -c sworks.xml attachment -t INC-12345 -i 987 -o trace.pcap
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use sworks::config::{Config, TransportOptions};
use sworks::decode::BodyMode;
use sworks::envelope;
use sworks::error::SworksError;
use sworks::output::{self, TicketView};
use sworks::sworks_client::{
    SworksClient, UpdatesParams, DEFAULT_LIMIT, DEFAULT_TICKET_TYPE, DEFAULT_WORKLOGS,
};

/// Command-line client for the SecureWorks ticket SOAP API.
#[derive(Parser, Debug)]
#[command(name = "sworks", version, about)]
struct Cli {
    /// XML credential file (UserName, Password, ClientId, LocationId, ApiUri).
    #[arg(short = 'c', long, env = "SWORKS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Verify the server's TLS certificate.
    #[arg(long, global = true)]
    verify_tls: bool,

    /// Collapse runs of whitespace in response bodies before decoding.
    #[arg(long, global = true)]
    collapse_whitespace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List customers visible to the account.
    Customers,
    /// List devices at the configured client and location.
    Devices,
    /// List contacts at the configured client and location.
    Contacts,
    /// Fetch a ticket attachment.
    Attachment(AttachmentArgs),
    /// Show one ticket.
    Ticket(TicketArgs),
    /// Show recently updated tickets.
    Updates(UpdatesArgs),
    /// Count the tickets in a queue.
    QueueCount(QueueArgs),
    /// List the ticket ids in a queue.
    QueueIds(QueueIdsArgs),
}

#[derive(Args, Debug)]
struct AttachmentArgs {
    /// Ticket number.
    #[arg(short = 't', long)]
    ticket: String,

    /// Attachment id.
    #[arg(short = 'i', long)]
    id: String,

    /// Write the decoded attachment to this file instead of printing it.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// CSV output.
    #[arg(short = 'C', long)]
    csv: bool,

    /// Long output (details and work logs).
    #[arg(short = 'L', long)]
    long: bool,

    /// Short output (no work logs).
    #[arg(short = 'S', long)]
    short: bool,

    /// Work logs only.
    #[arg(short = 'W', long)]
    work_logs: bool,
}

impl ViewArgs {
    /// Returns the selected views in a fixed order, defaulting to long.
    fn views(&self) -> Vec<TicketView> {
        let mut views = Vec::new();
        if self.csv {
            views.push(TicketView::Csv);
        }
        if self.work_logs {
            views.push(TicketView::WorkLogs);
        }
        if self.short {
            views.push(TicketView::Short);
        }
        if self.long {
            views.push(TicketView::Long);
        }
        if views.is_empty() {
            eprintln!("WARN: No Output Option Selected, using default: Long");
            views.push(TicketView::Long);
        }
        views
    }
}

#[derive(Args, Debug)]
struct TicketArgs {
    /// Ticket number.
    #[arg(short = 't', long)]
    ticket: String,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args, Debug)]
struct UpdatesArgs {
    /// Ticket type.
    #[arg(short = 't', long, default_value = DEFAULT_TICKET_TYPE)]
    ticket_type: String,

    /// Work-log filter.
    #[arg(long, default_value = DEFAULT_WORKLOGS)]
    worklogs: String,

    /// Maximum number of tickets (the service documents 500 as the maximum).
    #[arg(short = 'l', long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,

    /// Only tickets assigned to the customer.
    #[arg(long)]
    assigned_to_customer: bool,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args, Debug)]
struct QueueArgs {
    /// Ticket type.
    #[arg(short = 't', long, default_value = DEFAULT_TICKET_TYPE)]
    ticket_type: String,
}

#[derive(Args, Debug)]
struct QueueIdsArgs {
    /// Ticket type.
    #[arg(short = 't', long, default_value = DEFAULT_TICKET_TYPE)]
    ticket_type: String,

    /// Maximum number of ids (the service documents 500 as the maximum).
    #[arg(short = 'l', long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sworks=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::from_env().context("Failed to load configuration")?,
    };

    tracing::debug!(api_uri = %config.api_uri, "Configuration loaded");

    let options = transport_options(&cli)?;
    let client =
        SworksClient::with_options(&config, options).context("Failed to create SOAP client")?;

    if let Err(e) = run(&client, &cli).await {
        match e.downcast_ref::<SworksError>().and_then(SworksError::fault) {
            Some(fault) => eprint!("{}", fault.report(cli.command.operation_name())),
            None => eprintln!(
                "Error: {}",
                SworksError::sanitize_message(&format!("{:#}", e), &config.password)
            ),
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Merges environment overrides and command-line flags into transport options.
fn transport_options(cli: &Cli) -> Result<TransportOptions> {
    let mut options = TransportOptions::from_env().context("Invalid transport settings")?;
    if let Some(secs) = cli.timeout {
        options = options.with_timeout(Duration::from_secs(secs));
    }
    if cli.verify_tls {
        options = options.with_verify_tls(true);
    }
    if cli.collapse_whitespace {
        options = options.with_body_mode(BodyMode::CollapseWhitespace);
    }
    Ok(options)
}

impl Command {
    /// Remote operation behind the subcommand, for fault reports.
    fn operation_name(&self) -> &'static str {
        match self {
            Command::Customers => envelope::GET_CUSTOMER_LIST.name,
            Command::Devices => envelope::GET_DEVICE_LIST.name,
            Command::Contacts => envelope::GET_CONTACTS.name,
            Command::Attachment(_) => envelope::GET_ATTACHMENT.name,
            Command::Ticket(_) => envelope::GET_TICKET_DETAIL.name,
            Command::Updates(_) => envelope::GET_UPDATES.name,
            Command::QueueCount(_) => envelope::GET_QUEUE_COUNT.name,
            Command::QueueIds(_) => envelope::GET_QUEUE_TICKET_IDS.name,
        }
    }
}

async fn run(client: &SworksClient, cli: &Cli) -> Result<()> {
    let json = matches!(cli.format, OutputFormat::Json);

    match &cli.command {
        Command::Customers => {
            let resp = client.list_customers().await?;
            if json {
                print_json(&resp)?;
            } else {
                print!("{}", output::format_id_names(&resp.customers));
            }
        }
        Command::Devices => {
            let resp = client.list_devices().await?;
            if json {
                print_json(&resp)?;
            } else {
                print!("{}", output::format_devices(&resp.devices));
            }
        }
        Command::Contacts => {
            let resp = client.list_contacts().await?;
            if json {
                print_json(&resp)?;
            } else {
                print!("{}", output::format_id_names(&resp.contacts));
            }
        }
        Command::Attachment(args) => {
            let resp = client.get_attachment(&args.ticket, &args.id).await?;
            match &args.output {
                Some(path) => {
                    let bytes = resp.attachment.decode_content()?;
                    std::fs::write(path, &bytes)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), bytes = bytes.len(), "Attachment written");
                }
                None if json => print_json(&resp)?,
                None => print!("{}", output::format_attachment(&resp.attachment)),
            }
        }
        Command::Ticket(args) => {
            let resp = client.get_ticket_detail(&args.ticket).await?;
            if json {
                print_json(&resp)?;
            } else {
                for view in args.view.views() {
                    print!("{}", output::format_ticket(&resp.ticket, view));
                }
            }
        }
        Command::Updates(args) => {
            let params = UpdatesParams::new()
                .with_ticket_type(&args.ticket_type)
                .with_limit(args.limit)
                .with_worklogs(&args.worklogs)
                .with_assigned_to_customer(args.assigned_to_customer);
            let resp = client.get_updates(&params).await?;
            if json {
                print_json(&resp)?;
            } else {
                let views = args.view.views();
                for ticket in &resp.tickets {
                    for view in &views {
                        print!("{}", output::format_ticket(ticket, *view));
                    }
                }
            }
        }
        Command::QueueCount(args) => {
            let resp = client.get_queue_count(&args.ticket_type).await?;
            if json {
                print_json(&resp)?;
            } else {
                println!("{}", resp.count);
            }
        }
        Command::QueueIds(args) => {
            let resp = client
                .get_queue_ticket_ids(&args.ticket_type, args.limit)
                .await?;
            if json {
                print_json(&resp)?;
            } else {
                for id in &resp.ticket_ids {
                    println!("{}", id);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", output::format_json(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ticket_type_short_flag_on_every_queue_command() {
        let cli = Cli::try_parse_from(["sworks", "updates", "-t", "CHANGE", "-l", "10", "-S"]).unwrap();
        match cli.command {
            Command::Updates(args) => {
                assert_eq!(args.ticket_type, "CHANGE");
                assert_eq!(args.limit, 10);
                assert_eq!(args.view.views(), vec![TicketView::Short]);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["sworks", "queue-count", "-t", "CHANGE"]).unwrap();
        assert!(matches!(cli.command, Command::QueueCount(ref args) if args.ticket_type == "CHANGE"));

        let cli = Cli::try_parse_from(["sworks", "queue-ids", "-t", "CHANGE"]).unwrap();
        assert!(matches!(cli.command, Command::QueueIds(ref args) if args.ticket_type == "CHANGE"));
    }

    #[test]
    fn test_updates_defaults() {
        let cli = Cli::try_parse_from(["sworks", "updates"]).unwrap();
        match cli.command {
            Command::Updates(args) => {
                assert_eq!(args.ticket_type, DEFAULT_TICKET_TYPE);
                assert_eq!(args.worklogs, DEFAULT_WORKLOGS);
                assert_eq!(args.limit, DEFAULT_LIMIT);
                assert!(!args.assigned_to_customer);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
