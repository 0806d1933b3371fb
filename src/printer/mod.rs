//! # Printer Module
//!
//! Printer configuration shared by the relay, the CLI, and ticket payloads.
//!
//! ## Modules
//!
//! - [`config`]: Network printer settings and per-job targets

pub mod config;

pub use config::{PrinterConfig, PrinterTarget};
