//! Mode controller for the desk display: stock table, posture reminder,
//! clock face, and the null mode.

use log::{info, warn};

use crate::{
    clock::{self, TickInstant},
    config::TickerConfig,
    input::{ButtonEvent, InputProvider},
    quote::{self, FetchError, QuoteUpdate, StockRows},
    render::Screen,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Display mode. Buttons override the running mode; the stock and posture
/// modes also hand off to each other on their own.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Parked: nothing updates until a button wakes the device.
    Null,
    /// Quote table refresh cycle.
    StockStreaming,
    /// Stand-up nudge cycle.
    PostureReminder,
    /// Large clock face.
    Clock,
}

/// What the panel currently shows (or should show on the next push).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Visible {
    Welcome,
    StockTable,
    Posture,
    Clock { hour: u8, minute: u8 },
    ButtonAck { button: ButtonEvent },
}

/// Outcome of one quote fetch performed by the firmware on the app's behalf.
pub type FetchOutcome = Result<QuoteUpdate, FetchError>;

pub struct GlanceApp<IN: InputProvider> {
    input: IN,
    config: TickerConfig,
    mode: Mode,
    /// Mode the posture reminder returns to after its dwell.
    fallback: Mode,
    visible: Visible,
    pending_render: bool,
    /// Set while a quote fetch is outstanding; the firmware loop performs
    /// the fetch and feeds the outcome back via [`complete_stock_fetch`].
    ///
    /// [`complete_stock_fetch`]: GlanceApp::complete_stock_fetch
    fetch_pending: bool,
    /// Uptime of the last stock push; `None` until the first push, which
    /// makes the first fetch due immediately.
    last_stock_ms: Option<u64>,
    last_posture_ms: u64,
    next_clock_minute: u8,
    /// While the posture sign is up, the uptime at which the stock frame
    /// comes back.
    posture_restore_at: Option<u64>,
    rows: Option<StockRows>,
    refresh_count: u32,
    logged_decade: Option<u32>,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");

#[cfg(test)]
mod tests;
