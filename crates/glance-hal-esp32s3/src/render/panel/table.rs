use super::*;

use glance_core::quote::StockRows;

pub(super) fn draw_stock_table(frame: &mut FrameBuffer, rows: &StockRows) {
    for (index, row) in rows.iter().enumerate() {
        let y = TABLE_TOP + index * TABLE_ROW_PITCH;

        draw_text(frame, TABLE_SYMBOL_X, y, row.symbol, SYMBOL_SCALE, true);
        // Price cell sits a touch lower so both scales share a baseline.
        draw_text(frame, TABLE_PRICE_X, y + 3, row.text.as_str(), PRICE_SCALE, true);
    }
}
