//! Typed per-symbol quote records and display-row formatting.
//!
//! Each configured symbol carries an explicit ok/unavailable marker instead
//! of sentinel zero prices; a row that cannot be priced renders the literal
//! `Service N/A` placeholder and still participates in the normal
//! change-detection rules.

use core::fmt::Write as _;

use heapless::{String, Vec};

/// Hard cap on configured symbols (one display row each).
pub const MAX_SYMBOLS: usize = 6;

/// Capacity of one formatted price cell.
pub const ROW_TEXT_BYTES: usize = 26;

/// Placeholder text for a symbol that could not be priced.
pub const UNAVAILABLE_TEXT: &str = "Service N/A";

pub type RowText = String<ROW_TEXT_BYTES>;

/// Raw quote fields for one symbol, as fetched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolQuote {
    pub bid: f32,
    pub bid_size: u32,
    pub ask: f32,
    pub ask_size: u32,
    pub previous_close: f32,
}

/// Per-symbol fetch result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuoteStatus {
    Priced(SymbolQuote),
    Unavailable,
}

/// One update cycle's statuses, parallel to the configured symbol list.
pub type QuoteUpdate = Vec<QuoteStatus, MAX_SYMBOLS>;

/// Fetch boundary failure. The controller never sees payload details; any
/// failure collapses every symbol to [`QuoteStatus::Unavailable`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchError {
    /// Name resolution failed.
    Dns,
    /// TCP connect failed.
    Connect,
    /// Request write or response read failed.
    Request,
    /// Response was not a usable payload.
    Payload,
}

/// One rendered table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockRow {
    pub symbol: &'static str,
    pub text: RowText,
}

/// The full rendered table, compared by value for change detection.
pub type StockRows = Vec<StockRow, MAX_SYMBOLS>;

/// Size-weighted mid price: `(bid*bid_size + ask*ask_size) / (bid_size +
/// ask_size)`. `None` when the denominator is zero (degenerate quote).
pub fn weighted_mid(quote: &SymbolQuote) -> Option<f32> {
    let denominator = quote.bid_size + quote.ask_size;
    if denominator == 0 {
        return None;
    }

    let weighted = quote.bid * quote.bid_size as f32 + quote.ask * quote.ask_size as f32;
    Some(weighted / denominator as f32)
}

/// Formats one price cell: price to 2 decimals, then a directional glyph
/// and the unsigned change versus previous close.
pub fn format_row(status: &QuoteStatus) -> RowText {
    let mut text = RowText::new();

    let quote = match status {
        QuoteStatus::Priced(quote) => quote,
        QuoteStatus::Unavailable => {
            let _ = text.push_str(UNAVAILABLE_TEXT);
            return text;
        }
    };

    let Some(price) = weighted_mid(quote) else {
        let _ = text.push_str(UNAVAILABLE_TEXT);
        return text;
    };

    let diff = price - quote.previous_close;
    let (glyph, magnitude) = if diff < 0.0 { ('▼', -diff) } else { ('▲', diff) };

    // Capacity overflow cannot happen for plausible prices; a pathological
    // value just truncates the cell.
    let _ = write!(text, "{:.2} {}{:.2}", price, glyph, magnitude);
    text
}

/// Builds the display table for one update cycle. Statuses missing from a
/// short update (fetch aborted mid-list) count as unavailable.
pub fn build_rows(symbols: &[&'static str], update: &QuoteUpdate) -> StockRows {
    let mut rows = StockRows::new();

    for (index, symbol) in symbols.iter().enumerate() {
        let status = update.get(index).unwrap_or(&QuoteStatus::Unavailable);
        let _ = rows.push(StockRow {
            symbol,
            text: format_row(status),
        });
    }

    rows
}

/// All-placeholder table used when the whole fetch failed.
pub fn placeholder_rows(symbols: &[&'static str]) -> StockRows {
    let mut rows = StockRows::new();

    for symbol in symbols {
        let mut text = RowText::new();
        let _ = text.push_str(UNAVAILABLE_TEXT);
        let _ = rows.push(StockRow { symbol, text });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(bid: f32, bid_size: u32, ask: f32, ask_size: u32, close: f32) -> QuoteStatus {
        QuoteStatus::Priced(SymbolQuote {
            bid,
            bid_size,
            ask,
            ask_size,
            previous_close: close,
        })
    }

    #[test]
    fn weighted_mid_is_size_weighted() {
        let quote = SymbolQuote {
            bid: 10.0,
            bid_size: 3,
            ask: 14.0,
            ask_size: 1,
            previous_close: 0.0,
        };
        assert_eq!(weighted_mid(&quote), Some(11.0));
    }

    #[test]
    fn zero_sum_sizes_have_no_mid() {
        let quote = SymbolQuote {
            bid: 10.0,
            bid_size: 0,
            ask: 14.0,
            ask_size: 0,
            previous_close: 9.0,
        };
        assert_eq!(weighted_mid(&quote), None);
        assert_eq!(
            format_row(&QuoteStatus::Priced(quote)).as_str(),
            UNAVAILABLE_TEXT
        );
    }

    #[test]
    fn gain_renders_up_glyph() {
        let row = format_row(&priced(101.0, 1, 101.0, 1, 100.0));
        assert_eq!(row.as_str(), "101.00 ▲1.00");
    }

    #[test]
    fn loss_renders_down_glyph_with_unsigned_magnitude() {
        let row = format_row(&priced(99.6, 1, 99.6, 1, 100.0));
        assert_eq!(row.as_str(), "99.60 ▼0.40");
    }

    #[test]
    fn flat_price_counts_as_up() {
        let row = format_row(&priced(100.0, 1, 100.0, 1, 100.0));
        assert_eq!(row.as_str(), "100.00 ▲0.00");
    }

    #[test]
    fn unavailable_symbol_renders_beside_priced_rows() {
        let symbols: &[&'static str] = &["AAPL", "UVXY", "MSFT"];
        let mut update = QuoteUpdate::new();
        update.push(priced(101.0, 1, 101.0, 1, 100.0)).unwrap();
        update.push(QuoteStatus::Unavailable).unwrap();
        update.push(priced(50.0, 2, 50.0, 2, 51.0)).unwrap();

        let rows = build_rows(symbols, &update);
        assert_eq!(rows[0].text.as_str(), "101.00 ▲1.00");
        assert_eq!(rows[1].symbol, "UVXY");
        assert_eq!(rows[1].text.as_str(), "Service N/A");
        assert_eq!(rows[2].text.as_str(), "50.00 ▼1.00");
    }

    #[test]
    fn short_update_pads_with_placeholders() {
        let symbols: &[&'static str] = &["AAPL", "MSFT"];
        let mut update = QuoteUpdate::new();
        update.push(priced(101.0, 1, 101.0, 1, 100.0)).unwrap();

        let rows = build_rows(symbols, &update);
        assert_eq!(rows[1].text.as_str(), UNAVAILABLE_TEXT);
    }

    #[test]
    fn placeholder_rows_cover_every_symbol() {
        let symbols: &[&'static str] = &["AAPL", "ARKW", "TSLA"];
        let rows = placeholder_rows(symbols);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.text.as_str() == UNAVAILABLE_TEXT));
    }
}
