//! # Ticket Relay CLI
//!
//! Runs the station print relay and offers direct printing for diagnostics.
//!
//! ## Usage
//!
//! ```bash
//! # Serve the relay for the station front-end
//! ticket-relay serve --printer-ip 192.168.192.10
//!
//! # Print a ticket from a JSON file, bypassing HTTP
//! ticket-relay print exitpass ticket.json --printer-ip 192.168.192.10
//!
//! # Show the ticket text without printing
//! ticket-relay preview daypass ticket.json
//!
//! # Check that the printer accepts connections
//! ticket-relay test --printer-ip 192.168.192.10
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `ticket_relay=info`).

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use ticket_relay::{
    RelayError,
    job::TicketPrinter,
    printer::PrinterConfig,
    server::{PrinterRelay, RelayConfig, RelayStatus},
    ticket::{ExitPassPricing, TicketData, TicketFormatter, TicketType},
    transport::{NetworkPrinter, Printer, SettlePolicy},
};

/// Ticket Relay - taxi-station ticket printing
#[derive(Parser, Debug)]
#[command(name = "ticket-relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP print relay until Ctrl-C
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8105")]
        listen: String,

        #[command(flatten)]
        printer: PrinterArgs,

        #[command(flatten)]
        ticket: TicketArgs,

        /// Treat a silent printer after the write as a failure
        #[arg(long)]
        strict_settle: bool,
    },

    /// Print a ticket from a JSON file
    Print {
        /// Ticket template (daypass or exitpass)
        kind: TicketType,

        /// Ticket JSON file
        file: PathBuf,

        #[command(flatten)]
        printer: PrinterArgs,

        #[command(flatten)]
        ticket: TicketArgs,

        /// Treat a silent printer after the write as a failure
        #[arg(long)]
        strict_settle: bool,
    },

    /// Show the text of a ticket without printing it
    Preview {
        /// Ticket template (daypass or exitpass)
        kind: TicketType,

        /// Ticket JSON file
        file: PathBuf,

        #[command(flatten)]
        ticket: TicketArgs,
    },

    /// Check that the printer accepts connections
    Test {
        #[command(flatten)]
        printer: PrinterArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct PrinterArgs {
    /// Printer IP address or host name
    #[arg(long, default_value = "192.168.192.168")]
    printer_ip: String,

    /// Printer raw TCP port
    #[arg(long, default_value_t = 9100)]
    printer_port: u16,

    /// Connect timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,
}

impl PrinterArgs {
    fn to_config(&self) -> PrinterConfig {
        PrinterConfig {
            ip: self.printer_ip.clone(),
            port: self.printer_port,
            timeout: self.timeout_ms,
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
struct TicketArgs {
    /// Exit-pass pricing breakdown (service-fee or base-price)
    #[arg(long, default_value = "service-fee")]
    pricing: ExitPassPricing,

    /// Time zone for ticket timestamps
    #[arg(long, default_value = "Africa/Tunis")]
    timezone: Tz,
}

impl TicketArgs {
    fn formatter(&self) -> TicketFormatter {
        TicketFormatter::new(self.pricing, self.timezone)
    }
}

fn settle_policy(strict: bool) -> SettlePolicy {
    if strict {
        SettlePolicy::STRICT
    } else {
        SettlePolicy::LENIENT
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticket_relay=info,tower_http=info".into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), RelayError> {
    match cli.command {
        Commands::Serve {
            listen,
            printer,
            ticket,
            strict_settle,
        } => {
            let config = RelayConfig {
                listen_addr: listen,
                default_printer: printer.to_config(),
                pricing: ticket.pricing,
                settle: settle_policy(strict_settle),
                timezone: ticket.timezone,
            };

            let mut relay = PrinterRelay::new(config);
            if relay.start().await? != RelayStatus::Running {
                // Another relay already owns the port; nothing left to do.
                return Ok(());
            }

            tokio::signal::ctrl_c().await?;
            relay.stop().await?;
        }

        Commands::Print {
            kind,
            file,
            printer,
            ticket,
            strict_settle,
        } => {
            let data = read_ticket(&file)?;
            let tickets = TicketPrinter::new(
                ticket.formatter(),
                printer.to_config(),
                settle_policy(strict_settle),
            );

            let delivery = tickets.print(&data, kind).await?;
            println!("Printed {} ticket ({:?})", kind.label(), delivery);
        }

        Commands::Preview { kind, file, ticket } => {
            let data = read_ticket(&file)?;
            println!("{}", ticket.formatter().format(&data, kind));
        }

        Commands::Test { printer } => {
            let target = NetworkPrinter::from_config(&printer.to_config())?;
            if !target.is_online().await {
                return Err(RelayError::Connection(format!(
                    "Could not connect to printer at {}",
                    target.addr()
                )));
            }
            println!("Printer at {} is reachable", target.addr());
        }
    }

    Ok(())
}

fn read_ticket(path: &Path) -> Result<TicketData, RelayError> {
    let json = std::fs::read_to_string(path)?;
    TicketData::from_json(&json)
}
