use super::*;

pub(super) fn draw_posture_sign(frame: &mut FrameBuffer) {
    draw_rect(frame, 4, 4, LAND_W - 8, LAND_H - 8, true);
    draw_rect(frame, 7, 7, LAND_W - 14, LAND_H - 14, true);

    draw_text_centered(frame, 28, "UP!", 6, true);
    draw_text_centered(frame, 96, "RIGHT", 6, true);
}
