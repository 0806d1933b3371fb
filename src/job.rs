//! # Ticket Print Jobs
//!
//! Runs one ticket through the whole pipeline:
//!
//! ```text
//! TicketData ──format──► text ──encode──► ESC/POS bytes ──send──► printer
//! ```
//!
//! Shared by the HTTP relay and the CLI. Holds no per-job state; every call
//! opens and closes its own printer connection.

use tracing::{info, warn};

use crate::error::Result;
use crate::printer::PrinterConfig;
use crate::protocol;
use crate::ticket::{TicketData, TicketFormatter, TicketType};
use crate::transport::{Delivery, NetworkPrinter, Printer, SettlePolicy};

/// Formats, encodes and sends tickets.
#[derive(Debug, Clone)]
pub struct TicketPrinter {
    formatter: TicketFormatter,
    default_printer: PrinterConfig,
    settle: SettlePolicy,
}

impl TicketPrinter {
    pub fn new(
        formatter: TicketFormatter,
        default_printer: PrinterConfig,
        settle: SettlePolicy,
    ) -> Self {
        Self {
            formatter,
            default_printer,
            settle,
        }
    }

    pub fn default_printer(&self) -> &PrinterConfig {
        &self.default_printer
    }

    /// Ticket text as it will be printed.
    pub fn render_text(&self, ticket: &TicketData, kind: TicketType) -> String {
        self.formatter.format(ticket, kind)
    }

    /// Complete ESC/POS job for a ticket.
    pub fn render(&self, ticket: &TicketData, kind: TicketType) -> Vec<u8> {
        protocol::encode(&self.render_text(ticket, kind))
    }

    /// Printer a ticket goes to: its own target if it has one, else the default.
    pub fn printer_for(&self, ticket: &TicketData) -> Result<NetworkPrinter> {
        let printer = match &ticket.printer_config {
            Some(target) => NetworkPrinter::from_target(target)?,
            None => NetworkPrinter::from_config(&self.default_printer)?,
        };
        Ok(printer.with_settle(self.settle))
    }

    /// Print a ticket over a single new connection.
    pub async fn print(&self, ticket: &TicketData, kind: TicketType) -> Result<Delivery> {
        let printer = self.printer_for(ticket)?;
        let data = self.render(ticket, kind);

        let delivery = printer.print(&data).await?;
        info!(
            %kind,
            plate = %ticket.license_plate,
            printer = %printer.addr(),
            "Ticket printed"
        );
        Ok(delivery)
    }

    /// Connect-only check against the default printer, bounded by its timeout.
    pub async fn test_connection(&self) -> bool {
        match NetworkPrinter::from_config(&self.default_printer) {
            Ok(printer) => printer.is_online().await,
            Err(e) => {
                warn!(error = %e, "Default printer is misconfigured");
                false
            }
        }
    }
}
