//! # Printer Transport Layer
//!
//! This module provides the communication backend for sending print jobs.
//!
//! ## Available Transports
//!
//! - [`network`]: Raw TCP printing (port 9100)
//!
//! ## Delivery Semantics
//!
//! Raw-port printers never acknowledge a job. A send is reported as
//! delivered when the printer closes the connection after the write, or
//! (depending on [`SettlePolicy`]) when it stays silent for the settle
//! window. Connect and write failures are always errors.

pub mod network;

pub use network::{NetworkPrinter, SettlePolicy};

use crate::error::Result;

/// How a successful send completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The printer closed the connection after receiving the job.
    PeerClosed,
    /// The settle window elapsed with the connection still open.
    AssumedAfterTimeout,
}

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send a complete ESC/POS job over one fresh connection.
    async fn print(&self, data: &[u8]) -> Result<Delivery>;

    /// Check whether the printer accepts connections.
    async fn is_online(&self) -> bool;
}
