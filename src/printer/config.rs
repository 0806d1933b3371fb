//! # Printer Configuration
//!
//! Describes a network thermal printer as the front-end sees it.
//!
//! ## Wire Format
//!
//! Serialized in camelCase to match the station front-end:
//!
//! ```json
//! {
//!   "id": "printer1",
//!   "name": "Local Printer",
//!   "ip": "192.168.192.168",
//!   "port": 9100,
//!   "width": 48,
//!   "timeout": 5000,
//!   "model": "ESC/POS",
//!   "enabled": true,
//!   "isDefault": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw TCP printing port used by nearly every network thermal printer.
pub const DEFAULT_PRINTER_PORT: u16 = 9100;

/// Default connect timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// # Printer Configuration
///
/// - **ip**: host the printer listens on (IP address or DNS name)
/// - **port**: raw printing port, usually 9100
/// - **width**: characters per line on 80mm paper
/// - **timeout**: connect timeout in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterConfig {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub port: u16,
    pub width: u8,
    pub timeout: u64,
    pub model: String,
    pub enabled: bool,
    #[serde(default)]
    pub is_default: bool,
}

impl PrinterConfig {
    /// Connect timeout as a [`Duration`].
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            id: "printer1".to_string(),
            name: "Local Printer".to_string(),
            ip: "192.168.192.168".to_string(),
            port: DEFAULT_PRINTER_PORT,
            width: 48,
            timeout: DEFAULT_TIMEOUT_MS,
            model: "ESC/POS".to_string(),
            enabled: true,
            is_default: true,
        }
    }
}

/// Where to send one print job.
///
/// Tickets may carry their own target to bypass the relay's default printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterTarget {
    pub ip: String,
    pub port: u16,
}
