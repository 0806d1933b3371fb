//! # ESC/POS Protocol
//!
//! Turns formatted ticket text into the byte stream sent to the printer.
//!
//! ## Module Structure
//!
//! - [`commands`]: Individual ESC/POS commands (init, feed, cut)
//!
//! ## Frame Layout
//!
//! ```text
//! ┌────────┬──────────────────┬──────────┬──────────┐
//! │ 1B 40  │ UTF-8 ticket text│ 0A 0A 0A │ 1D 56 00 │
//! │ init   │                  │ 3 × LF   │ full cut │
//! └────────┴──────────────────┴──────────┴──────────┘
//! ```

pub mod commands;

/// Number of bytes [`encode`] adds around the text.
pub const FRAME_OVERHEAD: usize = 2 + commands::TRAILING_FEED_LINES + 3;

/// Wrap ticket text in an ESC/POS print job.
///
/// ## Example
///
/// ```
/// use ticket_relay::protocol;
///
/// let data = protocol::encode("Vehicule: 123 TU 4567");
/// assert_eq!(&data[..2], &[0x1B, 0x40]);
/// assert_eq!(&data[data.len() - 6..], &[0x0A, 0x0A, 0x0A, 0x1D, 0x56, 0x00]);
/// ```
pub fn encode(text: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(text.len() + FRAME_OVERHEAD);
    data.extend(commands::init());
    data.extend_from_slice(text.as_bytes());
    data.extend(commands::line_feeds(commands::TRAILING_FEED_LINES));
    data.extend(commands::cut_full());
    data
}
