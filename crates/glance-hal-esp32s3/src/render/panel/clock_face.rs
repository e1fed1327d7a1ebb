use super::*;

use core::fmt::Write as _;

use heapless::String;

const CLOCK_SCALE: usize = 7;

pub(super) fn draw_clock_face(frame: &mut FrameBuffer, hour: u8, minute: u8) {
    let mut face: String<8> = String::new();
    let _ = write!(face, "{:02}:{:02}", hour, minute);

    let height = 7 * CLOCK_SCALE;
    let y = LAND_H.saturating_sub(height) / 2;
    draw_text_centered(frame, y, face.as_str(), CLOCK_SCALE, true);
}
