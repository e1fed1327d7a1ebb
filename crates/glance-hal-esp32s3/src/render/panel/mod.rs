use epd2in7::{
    FrameBuffer,
    protocol::{HEIGHT, WIDTH},
};
use glance_core::render::Screen;

use super::FrameRenderer;

mod ack;
mod clock_face;
mod glyph;
mod posture;
mod primitives;
mod table;
mod text;
mod welcome;

#[allow(unused_imports)]
use self::{
    ack::*, clock_face::*, glyph::*, posture::*, primitives::*, table::*, text::*, welcome::*,
};

// The panel is wired portrait; the desk stand holds it landscape, so all
// layout happens on a rotated 264x176 canvas.
const LAND_W: usize = HEIGHT;
const LAND_H: usize = WIDTH;

const TABLE_TOP: usize = 4;
const TABLE_ROW_PITCH: usize = 28;
const TABLE_SYMBOL_X: usize = 10;
const TABLE_PRICE_X: usize = 85;
const SYMBOL_SCALE: usize = 3;
const PRICE_SCALE: usize = 2;

/// Renderer for the stock table, posture sign, clock face, and the small
/// status screens.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelRenderer;

impl PanelRenderer {
    pub const fn new() -> Self {
        Self
    }
}

impl FrameRenderer for PanelRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer) {
        frame.clear(false);

        match screen {
            Screen::Welcome { symbols } => draw_welcome(frame, symbols),
            Screen::StockTable { rows } => draw_stock_table(frame, rows),
            Screen::PostureReminder => draw_posture_sign(frame),
            Screen::Clock { hour, minute } => draw_clock_face(frame, hour, minute),
            Screen::ButtonAck { button } => draw_button_ack(frame, button),
        }
    }
}
