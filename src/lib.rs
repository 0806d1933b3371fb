//! # Ticket Relay - Station Ticket Printing
//!
//! Ticket Relay prints taxi-station tickets (day passes and exit passes) on
//! ESC/POS network thermal printers. It provides:
//!
//! - **Ticket templates**: Fixed-width text for each ticket type
//! - **Protocol implementation**: ESC/POS framing (init, feed, cut)
//! - **Transport**: Raw TCP printing with an explicit settle policy
//! - **HTTP relay**: Local JSON API for the station front-end
//!
//! ## Quick Start
//!
//! ```no_run
//! use ticket_relay::{
//!     protocol,
//!     ticket::{TicketData, TicketFormatter, TicketType},
//!     transport::{NetworkPrinter, Printer},
//! };
//!
//! # async fn example() -> ticket_relay::error::Result<()> {
//! let ticket = TicketData::from_json(r#"{
//!     "licensePlate": "245 TU 1234",
//!     "totalAmount": 2,
//!     "createdBy": "Ahmed",
//!     "createdAt": "2026-10-19T08:30:00Z"
//! }"#)?;
//!
//! let text = TicketFormatter::default().format(&ticket, TicketType::DayPass);
//! let printer = NetworkPrinter::new("192.168.192.10", 9100)?;
//! printer.print(&protocol::encode(&text)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ticket`] | Ticket payloads, templates and pricing |
//! | [`protocol`] | ESC/POS command builders |
//! | [`transport`] | Network printer backend |
//! | [`printer`] | Printer configurations |
//! | [`job`] | Format → encode → send pipeline |
//! | [`server`] | Local HTTP relay |
//! | [`error`] | Error types |

pub mod error;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod server;
pub mod ticket;
pub mod transport;

// Re-exports for convenience
pub use error::RelayError;
pub use printer::PrinterConfig;
pub use transport::NetworkPrinter;
