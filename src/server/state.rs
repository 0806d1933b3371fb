//! Relay configuration and shared handler state.

use chrono_tz::Tz;

use crate::job::TicketPrinter;
use crate::printer::PrinterConfig;
use crate::ticket::format::DEFAULT_TIMEZONE;
use crate::ticket::{ExitPassPricing, TicketFormatter};
use crate::transport::SettlePolicy;

/// Port the station front-end expects the relay on.
pub const DEFAULT_PORT: u16 = 8105;

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address to listen on (e.g., "127.0.0.1:8105")
    pub listen_addr: String,
    /// Printer used when a ticket does not name its own
    pub default_printer: PrinterConfig,
    /// Exit-pass pricing breakdown
    pub pricing: ExitPassPricing,
    /// What a silent printer after a write means
    pub settle: SettlePolicy,
    /// Time zone for ticket timestamps
    pub timezone: Tz,
}

impl RelayConfig {
    /// Default configuration listening on `127.0.0.1:<port>`.
    pub fn with_port(port: u16) -> Self {
        Self {
            listen_addr: format!("127.0.0.1:{}", port),
            ..Default::default()
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("127.0.0.1:{}", DEFAULT_PORT),
            default_printer: PrinterConfig::default(),
            pricing: ExitPassPricing::default(),
            settle: SettlePolicy::default(),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

/// Application state shared across handlers.
///
/// Immutable for the lifetime of the server; handlers never lock.
pub struct AppState {
    pub tickets: TicketPrinter,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            tickets: TicketPrinter::new(
                TicketFormatter::new(config.pricing, config.timezone),
                config.default_printer,
                config.settle,
            ),
        }
    }
}
