//! Field scanner for the quote endpoint payload.
//!
//! The endpoint answers one JSON document with an array of per-symbol
//! objects (`"symbol":"AAPL","bid":...`). A full JSON parser buys nothing
//! here; the scanner slices out each symbol's object window and extracts
//! the five numeric fields the controller needs. Anything missing or
//! malformed marks just that symbol unavailable.

use core::fmt::Write as _;

use heapless::String;

use crate::quote::{QuoteStatus, QuoteUpdate, SymbolQuote};

const SYMBOL_KEY: &str = "\"symbol\":\"";

/// Scans one payload into a status per configured symbol.
///
/// Never fails as a whole: a payload with no usable objects simply yields
/// all-unavailable statuses. Transport-level failures are the caller's to
/// report.
pub fn scan_update(body: &str, symbols: &[&'static str]) -> QuoteUpdate {
    let mut update = QuoteUpdate::new();

    for symbol in symbols {
        let _ = update.push(scan_symbol(body, symbol));
    }

    update
}

fn scan_symbol(body: &str, symbol: &str) -> QuoteStatus {
    let Some(window) = symbol_window(body, symbol) else {
        return QuoteStatus::Unavailable;
    };

    let quote = SymbolQuote {
        bid: match field_f32(window, "\"bid\":") {
            Some(value) => value,
            None => return QuoteStatus::Unavailable,
        },
        bid_size: match field_u32(window, "\"bidSize\":") {
            Some(value) => value,
            None => return QuoteStatus::Unavailable,
        },
        ask: match field_f32(window, "\"ask\":") {
            Some(value) => value,
            None => return QuoteStatus::Unavailable,
        },
        ask_size: match field_u32(window, "\"askSize\":") {
            Some(value) => value,
            None => return QuoteStatus::Unavailable,
        },
        previous_close: match field_f32(window, "\"regularMarketPreviousClose\":") {
            Some(value) => value,
            None => return QuoteStatus::Unavailable,
        },
    };

    QuoteStatus::Priced(quote)
}

/// Slice of `body` from this symbol's marker to the next symbol marker (or
/// the end), so one object's fields cannot leak into another's.
fn symbol_window<'a>(body: &'a str, symbol: &str) -> Option<&'a str> {
    let mut needle: String<32> = String::new();
    write!(needle, "{}{}\"", SYMBOL_KEY, symbol).ok()?;

    let start = body.find(needle.as_str())?;
    let tail = &body[start + needle.len()..];

    match tail.find(SYMBOL_KEY) {
        Some(next) => Some(&tail[..next]),
        None => Some(tail),
    }
}

fn field_f32(window: &str, key: &str) -> Option<f32> {
    number_token(window, key)?.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn field_u32(window: &str, key: &str) -> Option<u32> {
    number_token(window, key)?.parse::<u32>().ok()
}

fn number_token<'a>(window: &'a str, key: &str) -> Option<&'a str> {
    let start = window.find(key)? + key.len();
    let tail = window[start..].trim_start();

    let end = tail
        .find(|c: char| !matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
        .unwrap_or(tail.len());

    if end == 0 {
        return None;
    }

    Some(&tail[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::QuoteStatus;

    const BODY: &str = concat!(
        "{\"quoteResponse\":{\"result\":[",
        "{\"symbol\":\"AAPL\",\"bid\":101.5,\"bidSize\":9,\"ask\":102.5,",
        "\"askSize\":11,\"regularMarketPreviousClose\":100.0},",
        "{\"symbol\":\"UVXY\",\"bid\":null,\"bidSize\":0,\"ask\":null,",
        "\"askSize\":0,\"regularMarketPreviousClose\":12.0},",
        "{\"symbol\":\"MSFT\",\"bid\":250.0,\"bidSize\":4,\"ask\":251.0,",
        "\"askSize\":4,\"regularMarketPreviousClose\":249.0}",
        "],\"error\":null}}"
    );

    #[test]
    fn priced_symbols_are_extracted() {
        let update = scan_update(BODY, &["AAPL", "MSFT"]);

        match update[0] {
            QuoteStatus::Priced(quote) => {
                assert_eq!(quote.bid, 101.5);
                assert_eq!(quote.bid_size, 9);
                assert_eq!(quote.ask, 102.5);
                assert_eq!(quote.ask_size, 11);
                assert_eq!(quote.previous_close, 100.0);
            }
            QuoteStatus::Unavailable => panic!("AAPL should be priced"),
        }
        assert!(matches!(update[1], QuoteStatus::Priced(_)));
    }

    #[test]
    fn null_fields_mark_symbol_unavailable() {
        let update = scan_update(BODY, &["UVXY"]);
        assert_eq!(update[0], QuoteStatus::Unavailable);
    }

    #[test]
    fn missing_symbol_is_unavailable() {
        let update = scan_update(BODY, &["TSLA"]);
        assert_eq!(update[0], QuoteStatus::Unavailable);
    }

    #[test]
    fn fields_do_not_leak_across_objects() {
        // UVXY's window sits between UVXY and MSFT; its null bid must not
        // pick up MSFT's numbers.
        let update = scan_update(BODY, &["UVXY", "AAPL"]);
        assert_eq!(update[0], QuoteStatus::Unavailable);
        assert!(matches!(update[1], QuoteStatus::Priced(_)));
    }

    #[test]
    fn empty_body_yields_all_unavailable() {
        let update = scan_update("", &["AAPL", "MSFT"]);
        assert!(update.iter().all(|s| *s == QuoteStatus::Unavailable));
    }

    #[test]
    fn scientific_notation_is_accepted() {
        let body = "{\"symbol\":\"PENNY\",\"bid\":1.2e-1,\"bidSize\":1,\
                    \"ask\":1.4e-1,\"askSize\":1,\
                    \"regularMarketPreviousClose\":1.5e-1}";
        let update = scan_update(body, &["PENNY"]);
        assert!(matches!(update[0], QuoteStatus::Priced(_)));
    }
}
