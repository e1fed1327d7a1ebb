use super::*;

pub(super) fn draw_welcome(frame: &mut FrameBuffer, symbols: &[&'static str]) {
    draw_text_centered(frame, 24, "Fetching stocks", 2, true);
    draw_hline(frame, 32, 52, LAND_W - 64, true);

    // Up to six symbols in two rows of three.
    for (index, symbol) in symbols.iter().enumerate() {
        let column = index % 3;
        let row = index / 3;
        let x = 24 + column * 84;
        let y = 78 + row * 34;
        draw_text(frame, x, y, symbol, 2, true);
    }
}
