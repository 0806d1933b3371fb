//! Exit-pass pricing breakdown.
//!
//! Two station front-ends print exit passes with different breakdowns. The
//! policy is chosen per relay; neither one touches the ticket total, which
//! is always printed as sent.

use std::fmt;
use std::str::FromStr;

use crate::error::RelayError;

/// Flat service fee charged per seat when a vehicle leaves empty.
pub const SERVICE_FEE_PER_SEAT: f64 = 0.15;

/// Which breakdown an exit pass prints above its total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPassPricing {
    /// Service fee × capacity for empty departures, base price × seats otherwise.
    #[default]
    ServiceFeeOnFullDeparture,
    /// Always base price × seats.
    BasePricePerSeat,
}

/// One computed breakdown line pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceBreakdown {
    /// Empty-vehicle departure: flat fee for every seat of the vehicle.
    ServiceFee { capacity: u32, amount: f64 },
    /// Booked seats at the route's base price.
    BookedSeats { seats: u32, amount: f64 },
}

impl ExitPassPricing {
    /// Compute the breakdown, if the ticket carries enough to show one.
    ///
    /// Nothing is shown unless both `base_price` and `seats` are non-zero.
    pub fn breakdown(
        &self,
        base_price: Option<f64>,
        seats: u32,
        capacity: Option<u32>,
    ) -> Option<PriceBreakdown> {
        let base_price = base_price.filter(|p| *p != 0.0 && !p.is_nan())?;
        if seats == 0 {
            return None;
        }

        match (self, capacity) {
            (Self::ServiceFeeOnFullDeparture, Some(capacity))
                if capacity != 0 && seats == capacity =>
            {
                Some(PriceBreakdown::ServiceFee {
                    capacity,
                    amount: SERVICE_FEE_PER_SEAT * capacity as f64,
                })
            }
            _ => Some(PriceBreakdown::BookedSeats {
                seats,
                amount: base_price * seats as f64,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceFeeOnFullDeparture => "service-fee",
            Self::BasePricePerSeat => "base-price",
        }
    }
}

impl fmt::Display for ExitPassPricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExitPassPricing {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service-fee" => Ok(Self::ServiceFeeOnFullDeparture),
            "base-price" => Ok(Self::BasePricePerSeat),
            other => Err(RelayError::InvalidConfig(format!(
                "Unknown pricing policy '{}' (expected service-fee or base-price)",
                other
            ))),
        }
    }
}
