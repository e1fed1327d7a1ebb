use super::*;

/// Fixed 6-cell advance keeps the price column aligned across rows.
pub(super) const fn char_advance(scale: usize) -> usize {
    6 * scale
}

pub(super) const fn text_width(len: usize, scale: usize) -> usize {
    len * char_advance(scale)
}

pub(super) fn draw_text(
    frame: &mut FrameBuffer,
    x: usize,
    y: usize,
    textual: &str,
    scale: usize,
    on: bool,
) {
    let mut cursor = x;
    for c in textual.chars() {
        draw_glyph_5x7(frame, cursor, y, &glyph_5x7(c), scale, on);
        cursor += char_advance(scale);
    }
}

pub(super) fn draw_text_centered(
    frame: &mut FrameBuffer,
    y: usize,
    textual: &str,
    scale: usize,
    on: bool,
) {
    let width = text_width(textual.chars().count(), scale);
    let x = LAND_W.saturating_sub(width) / 2;
    draw_text(frame, x, y, textual, scale, on);
}
