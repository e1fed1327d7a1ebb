use super::*;

use glance_core::input::ButtonEvent;

pub(super) fn draw_button_ack(frame: &mut FrameBuffer, button: ButtonEvent) {
    draw_text_centered(frame, 52, button.label(), 3, true);
    draw_text_centered(frame, 96, "standing by", 2, true);
}
