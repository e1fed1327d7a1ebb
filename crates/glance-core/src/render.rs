//! Screen view models handed to the platform renderer.
//!
//! The controller owns what to show; the HAL owns pixels. A renderer
//! receives one [`Screen`] per display push and lays it out however the
//! attached panel wants.

use crate::input::ButtonEvent;
use crate::quote::StockRows;

/// What the display should show right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen<'a> {
    /// Boot splash shown until the first quote table lands.
    Welcome { symbols: &'a [&'static str] },
    /// The per-symbol price table.
    StockTable { rows: &'a StockRows },
    /// Full-screen stand-up nudge.
    PostureReminder,
    /// Large HH:MM clock face.
    Clock { hour: u8, minute: u8 },
    /// Acknowledgement for a key without a dedicated screen.
    ButtonAck { button: ButtonEvent },
}
