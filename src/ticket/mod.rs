//! # Tickets
//!
//! Ticket payloads sent by the station front-end and their text rendering.
//!
//! ## Modules
//!
//! - [`format`]: Station ticket templates (day pass, exit pass)
//! - [`pricing`]: Exit-pass pricing breakdown policies
//!
//! ## Payload
//!
//! ```json
//! {
//!   "licensePlate": "245 TU 1234",
//!   "destinationName": "Sousse",
//!   "seatNumber": 3,
//!   "totalAmount": 7.65,
//!   "basePrice": 2.5,
//!   "vehicleCapacity": 8,
//!   "createdBy": "Ahmed",
//!   "createdAt": "2026-10-19T08:30:00Z",
//!   "printerConfig": { "ip": "192.168.192.10", "port": 9100 }
//! }
//! ```

pub mod format;
pub mod pricing;

pub use format::TicketFormatter;
pub use pricing::{ExitPassPricing, PriceBreakdown};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::printer::PrinterTarget;

/// One ticket print request.
///
/// `totalAmount` is required even though the front-end types it as
/// optional: every template prints it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketData {
    pub license_plate: String,
    pub destination_name: Option<String>,
    pub route_name: Option<String>,
    #[serde(default)]
    pub seat_number: u32,
    pub total_amount: f64,
    pub base_price: Option<f64>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub staff_first_name: Option<String>,
    pub staff_last_name: Option<String>,
    pub vehicle_capacity: Option<u32>,
    pub exit_pass_count: Option<u32>,
    pub printer_config: Option<PrinterTarget>,
}

impl TicketData {
    /// Decode a ticket from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// `"First Last"` when both staff names are present.
    pub fn staff_name(&self) -> Option<String> {
        match (non_empty(&self.staff_first_name), non_empty(&self.staff_last_name)) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        }
    }
}

/// Treat missing and empty optional strings alike.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Ticket template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketType {
    DayPass,
    ExitPass,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayPass => "daypass",
            Self::ExitPass => "exitpass",
        }
    }

    /// Human-readable name used in relay responses.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DayPass => "day pass",
            Self::ExitPass => "exit pass",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daypass" => Ok(Self::DayPass),
            "exitpass" => Ok(Self::ExitPass),
            other => Err(RelayError::InvalidTicket(format!(
                "Unknown ticket type '{}' (expected daypass or exitpass)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "licensePlate": "245 TU 1234",
        "totalAmount": 2,
        "createdBy": "Ahmed",
        "createdAt": "2026-10-19T08:30:00Z"
    }"#;

    #[test]
    fn test_decode_minimal_ticket() {
        let ticket = TicketData::from_json(MINIMAL).unwrap();
        assert_eq!(ticket.license_plate, "245 TU 1234");
        assert_eq!(ticket.seat_number, 0);
        assert_eq!(ticket.total_amount, 2.0);
        assert!(ticket.printer_config.is_none());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "licensePlate": "245 TU 1234",
            "totalAmount": 2,
            "createdBy": "Ahmed",
            "createdAt": "2026-10-19T08:30:00+01:00",
            "stationName": "Monastir",
            "companyLogo": null,
            "printerConfig": { "ip": "10.0.0.9", "port": 9100 }
        }"#;
        let ticket = TicketData::from_json(json).unwrap();
        assert_eq!(ticket.printer_config.unwrap().ip, "10.0.0.9");
    }

    #[test]
    fn test_decode_requires_total_amount() {
        let json = r#"{
            "licensePlate": "245 TU 1234",
            "createdBy": "Ahmed",
            "createdAt": "2026-10-19T08:30:00Z"
        }"#;
        let err = TicketData::from_json(json).unwrap_err();
        assert!(err.to_string().contains("totalAmount"));
    }

    #[test]
    fn test_staff_name_needs_both_parts() {
        let mut ticket = TicketData::from_json(MINIMAL).unwrap();
        ticket.staff_first_name = Some("Sami".to_string());
        assert_eq!(ticket.staff_name(), None);

        ticket.staff_last_name = Some(String::new());
        assert_eq!(ticket.staff_name(), None);

        ticket.staff_last_name = Some("Ben Ali".to_string());
        assert_eq!(ticket.staff_name().as_deref(), Some("Sami Ben Ali"));
    }

    #[test]
    fn test_ticket_type_parse() {
        assert_eq!("daypass".parse::<TicketType>().unwrap(), TicketType::DayPass);
        assert_eq!("ExitPass".parse::<TicketType>().unwrap(), TicketType::ExitPass);
        assert!("booking".parse::<TicketType>().is_err());
    }
}
