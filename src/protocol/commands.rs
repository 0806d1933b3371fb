//! # ESC/POS Commands
//!
//! The handful of ESC/POS commands a ticket needs: reset the printer, feed
//! paper past the cutter, and cut.
//!
//! ## Escape Sequence Structure
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Three bytes: `GS V m`
//!
//! Any text between commands is printed as-is. Thermal printers that speak
//! ESC/POS treat unknown bytes as printable characters, so the text must not
//! contain raw `ESC`/`GS` bytes.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for paper cutting and character size commands.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// Number of line feeds sent between the ticket text and the cut.
pub const TRAILING_FEED_LINES: usize = 3;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and restores power-on defaults (alignment, text
/// size, emphasis). Sent at the start of every ticket.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use ticket_relay::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER CONTROL
// ============================================================================

/// Print the line buffer and advance `n` lines.
#[inline]
pub fn line_feeds(n: usize) -> Vec<u8> {
    vec![LF; n]
}

/// # Full Cut (GS V 0)
///
/// Cuts the paper at the current position. The cutter sits a few lines
/// above the print head on most models, hence the feeds sent before it.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V NUL |
/// | Hex     | 1D 56 00 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0x00]
}
