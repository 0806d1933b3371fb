//! # Ticket Templates
//!
//! Renders tickets as plain text for a 32-column thermal printout.
//!
//! ## Layout
//!
//! ```text
//! ================================     ┐
//!   STE DHRAIFF SERVICES               │ banner
//!      TRANSPORT                       │
//! ================================     ┘
//!                                        blank
//!    PASS JOURNÉE                      ┐
//! --------------------------------     │ body (per ticket type)
//! ...                                  ┘
//! Agent: <first> <last>                  staff footer (optional)
//!                                      ┐
//!                                      │ feed allowance before the cut
//!                                      ┘
//! ```

use chrono_tz::Tz;
use rust_decimal::prelude::*;

use super::pricing::{ExitPassPricing, PriceBreakdown};
use super::{TicketData, TicketType, non_empty};

/// Fixed station banner printed on every ticket.
pub const BANNER: [&str; 4] = [
    "================================",
    "  STE DHRAIFF SERVICES",
    "     TRANSPORT",
    "================================",
];

/// Section separator.
pub const RULE: &str = "--------------------------------";

/// Blank lines left at the end of the text for the paper feed.
pub const FEED_LINES: usize = 3;

/// Currency suffix for amounts.
pub const CURRENCY: &str = "TND";

/// Decimal places printed for amounts.
const DECIMAL_PLACES: u32 = 2;

/// Time zone the stations operate in.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Africa::Tunis;

/// Renders [`TicketData`] into ticket text.
#[derive(Debug, Clone, Copy)]
pub struct TicketFormatter {
    pricing: ExitPassPricing,
    timezone: Tz,
}

impl Default for TicketFormatter {
    fn default() -> Self {
        Self::new(ExitPassPricing::default(), DEFAULT_TIMEZONE)
    }
}

impl TicketFormatter {
    pub fn new(pricing: ExitPassPricing, timezone: Tz) -> Self {
        Self { pricing, timezone }
    }

    /// Render a ticket. Lines are joined with `\n`, without a final newline.
    pub fn format(&self, ticket: &TicketData, kind: TicketType) -> String {
        let mut lines: Vec<String> = BANNER.iter().map(|s| s.to_string()).collect();
        lines.push(String::new());

        match kind {
            TicketType::DayPass => self.day_pass_body(ticket, &mut lines),
            TicketType::ExitPass => self.exit_pass_body(ticket, &mut lines),
        }

        if let Some(staff) = ticket.staff_name() {
            lines.push(format!("Agent: {}", staff));
        }

        lines.extend(std::iter::repeat_n(String::new(), FEED_LINES));
        lines.join("\n")
    }

    fn day_pass_body(&self, ticket: &TicketData, lines: &mut Vec<String>) {
        lines.push("   PASS JOURNÉE".to_string());
        lines.push(RULE.to_string());
        lines.push(format!("Vehicule: {}", ticket.license_plate));
        if let Some(route) = non_empty(&ticket.route_name) {
            lines.push(format!("Route: {}", route));
        }
        lines.push(format!("Montant: {}", money(ticket.total_amount)));
        lines.push(format!("Date: {}", self.timestamp(ticket)));
        lines.push(format!("Agent: {}", ticket.created_by));
        lines.push(RULE.to_string());
        lines.push("Valide toute la journée!".to_string());
    }

    fn exit_pass_body(&self, ticket: &TicketData, lines: &mut Vec<String>) {
        lines.push("   AUTORISATION SORTIE".to_string());
        lines.push(RULE.to_string());
        lines.push(format!("Vehicule: {}", ticket.license_plate));
        if let Some(destination) = non_empty(&ticket.destination_name) {
            lines.push(format!("Destination: {}", destination));
        }

        let breakdown = self.pricing.breakdown(
            ticket.base_price,
            ticket.seat_number,
            ticket.vehicle_capacity,
        );
        let total_label = match self.pricing {
            ExitPassPricing::ServiceFeeOnFullDeparture => {
                match breakdown {
                    Some(PriceBreakdown::ServiceFee { capacity, amount }) => {
                        lines.push(format!("Capacité véhicule: {} sièges", capacity));
                        lines.push(format!("Frais de service: {}", money(amount)));
                    }
                    Some(PriceBreakdown::BookedSeats { seats, amount }) => {
                        lines.push(format!("Sièges réservés: {}", seats));
                        lines.push(format!("Prix de base: {}", money(amount)));
                    }
                    None => {}
                }
                "Montant Total"
            }
            ExitPassPricing::BasePricePerSeat => {
                if let Some(PriceBreakdown::BookedSeats { seats, amount }) = breakdown {
                    lines.push(format!("Sièges: {}", seats));
                    lines.push(format!("Prix: {}", money(amount)));
                }
                "Total"
            }
        };

        // Printed as sent; may differ from the breakdown above.
        lines.push(format!("{}: {}", total_label, money(ticket.total_amount)));
        lines.push(format!("Date: {}", self.timestamp(ticket)));
        lines.push(format!("Agent: {}", ticket.created_by));
        lines.push(RULE.to_string());
        lines.push("🚪 Sortie autorisée!".to_string());
    }

    /// `dd/mm/yyyy HH:MM` in the station time zone.
    fn timestamp(&self, ticket: &TicketData) -> String {
        ticket
            .created_at
            .with_timezone(&self.timezone)
            .format("%d/%m/%Y %H:%M")
            .to_string()
    }
}

/// Two decimals, exact halves rounded away from zero.
///
/// Rounds the exact binary value, so 2.125 prints as 2.13 while 1.005
/// (stored just below the half) prints as 1.00.
fn money(amount: f64) -> String {
    match Decimal::from_f64_retain(amount) {
        Some(value) => {
            let mut rounded = value
                .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(DECIMAL_PLACES);
            format!("{} {}", rounded, CURRENCY)
        }
        None => format!("{:.2} {}", amount, CURRENCY),
    }
}
