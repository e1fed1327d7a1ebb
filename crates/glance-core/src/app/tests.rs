use super::*;
use crate::clock::{LocalTime, Weekday};
use crate::input::ButtonLatch;
use crate::quote::{QuoteStatus, SymbolQuote};

fn config() -> TickerConfig {
    TickerConfig::new(&["AAPL", "MSFT"]).unwrap()
}

fn at(uptime_ms: u64, weekday: Weekday, hour: u8, minute: u8) -> TickInstant {
    TickInstant::new(uptime_ms, LocalTime::new(weekday, hour, minute))
}

fn monday_noon(uptime_ms: u64) -> TickInstant {
    at(uptime_ms, Weekday::Monday, 12, 0)
}

fn priced(value: f32) -> QuoteStatus {
    QuoteStatus::Priced(SymbolQuote {
        bid: value,
        bid_size: 1,
        ask: value,
        ask_size: 1,
        previous_close: value - 1.0,
    })
}

fn update_of(prices: &[f32]) -> QuoteUpdate {
    let mut update = QuoteUpdate::new();
    for price in prices {
        update.push(priced(*price)).unwrap();
    }
    update
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ScreenKind {
    Welcome,
    StockTable,
    Posture,
    Clock(u8, u8),
    ButtonAck,
}

fn screen_kind<IN: InputProvider>(app: &GlanceApp<IN>) -> ScreenKind {
    let mut kind = ScreenKind::Welcome;
    app.with_screen(|screen| {
        kind = match screen {
            Screen::Welcome { .. } => ScreenKind::Welcome,
            Screen::StockTable { .. } => ScreenKind::StockTable,
            Screen::PostureReminder => ScreenKind::Posture,
            Screen::Clock { hour, minute } => ScreenKind::Clock(hour, minute),
            Screen::ButtonAck { .. } => ScreenKind::ButtonAck,
        };
    });
    kind
}

/// Boots an app and lands the first table so tests can start from a
/// populated screen.
fn booted(latch: &ButtonLatch, config: TickerConfig) -> GlanceApp<&ButtonLatch> {
    let mut app = GlanceApp::new(latch, config);
    assert_eq!(app.tick(monday_noon(0)), TickResult::RenderRequested);
    assert!(app.fetch_pending());
    app.complete_stock_fetch(Ok(update_of(&[101.0, 250.0])), monday_noon(500));
    assert_eq!(app.tick(monday_noon(500)), TickResult::RenderRequested);
    assert_eq!(screen_kind(&app), ScreenKind::StockTable);
    // The cycle parks on the posture check after a push; pull it back so
    // scenarios start from the stock mode.
    latch.press(ButtonEvent::Button1);
    assert_eq!(app.tick(monday_noon(600)), TickResult::RenderRequested);
    assert_eq!(app.mode(), Mode::StockStreaming);
    app
}

#[test]
fn first_tick_shows_splash_and_requests_a_fetch() {
    let latch = ButtonLatch::new();
    let mut app = GlanceApp::new(&latch, config());

    // First fetch is due even on a weekend so the panel leaves the splash.
    assert_eq!(
        app.tick(at(0, Weekday::Saturday, 12, 0)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::Welcome);
    assert!(app.fetch_pending());
}

#[test]
fn completed_fetch_pushes_the_table_once() {
    let latch = ButtonLatch::new();
    let app = booted(&latch, config());
    assert_eq!(app.refresh_count(), 1);
}

#[test]
fn unchanged_rows_do_not_repaint() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config().with_posture_refresh_secs(100_000));

    let later = monday_noon(302_000);
    assert_eq!(app.tick(later), TickResult::NoRender);
    assert!(app.fetch_pending());

    app.complete_stock_fetch(Ok(update_of(&[101.0, 250.0])), later);
    assert_eq!(app.tick(monday_noon(302_500)), TickResult::NoRender);
    assert_eq!(app.refresh_count(), 1);
}

#[test]
fn changed_rows_repaint_and_advance_the_cycle() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config().with_posture_refresh_secs(100_000));

    let later = monday_noon(302_000);
    let _ = app.tick(later);
    app.complete_stock_fetch(Ok(update_of(&[102.5, 250.0])), later);

    assert_eq!(app.tick(monday_noon(302_500)), TickResult::RenderRequested);
    assert_eq!(screen_kind(&app), ScreenKind::StockTable);
    assert_eq!(app.refresh_count(), 2);
}

#[test]
fn no_fetch_before_the_refresh_interval() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config().with_posture_refresh_secs(100_000));

    for uptime in [10_000_u64, 150_000, 299_000] {
        assert_eq!(app.tick(monday_noon(uptime)), TickResult::NoRender);
        assert!(!app.fetch_pending());
    }

    let _ = app.tick(monday_noon(301_000));
    assert!(app.fetch_pending());
}

#[test]
fn closed_market_keeps_the_cached_table_without_fetching() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config().with_posture_refresh_secs(100_000));

    for uptime in [301_000_u64, 301_500, 600_000, 900_000] {
        assert_eq!(
            app.tick(at(uptime, Weekday::Saturday, 12, 0)),
            TickResult::NoRender
        );
        assert!(!app.fetch_pending());
    }
    assert_eq!(app.refresh_count(), 1);
}

#[test]
fn failed_fetch_paints_placeholder_rows() {
    let latch = ButtonLatch::new();
    let mut app = GlanceApp::new(&latch, config());

    let _ = app.tick(monday_noon(0));
    app.complete_stock_fetch(Err(FetchError::Connect), monday_noon(500));

    assert_eq!(app.tick(monday_noon(500)), TickResult::RenderRequested);
    assert_eq!(screen_kind(&app), ScreenKind::StockTable);

    let mut first_row_text = None;
    app.with_screen(|screen| {
        if let Screen::StockTable { rows } = screen {
            first_row_text = Some(rows[0].text.clone());
        }
    });
    assert_eq!(first_row_text.unwrap().as_str(), "Service N/A");
}

#[test]
fn posture_reminder_raises_then_restores_the_table() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    // Saturday noon: stock hands over without fetching, posture is due.
    let _ = app.tick(at(301_000, Weekday::Saturday, 12, 0));
    assert_eq!(
        app.tick(at(301_500, Weekday::Saturday, 12, 0)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::Posture);
    assert_eq!(app.mode(), Mode::PostureReminder);

    // Dwell not yet over.
    assert_eq!(
        app.tick(at(304_000, Weekday::Saturday, 12, 0)),
        TickResult::NoRender
    );

    assert_eq!(
        app.tick(at(306_500, Weekday::Saturday, 12, 0)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::StockTable);
    assert_eq!(app.mode(), Mode::StockStreaming);
    // The sign and its restore are one scheduled update, not two.
    assert_eq!(app.refresh_count(), 2);
}

#[test]
fn posture_reminder_respects_the_quiet_window() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    // 06:00 is inside the overnight quiet window: the mode waits in place
    // without pushing anything.
    let _ = app.tick(at(301_000, Weekday::Saturday, 6, 0));
    assert_eq!(
        app.tick(at(301_500, Weekday::Saturday, 6, 0)),
        TickResult::NoRender
    );
    assert_eq!(app.mode(), Mode::PostureReminder);

    // First tick past 09:00 lets the overdue reminder through.
    assert_eq!(
        app.tick(at(302_000, Weekday::Saturday, 9, 1)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::Posture);
}

#[test]
fn button_one_redisplays_the_cached_table_uncounted() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    latch.press(ButtonEvent::Button3);
    let _ = app.tick(monday_noon(1_000));

    latch.press(ButtonEvent::Button1);
    assert_eq!(app.tick(monday_noon(2_000)), TickResult::RenderRequested);
    assert_eq!(screen_kind(&app), ScreenKind::StockTable);
    assert_eq!(app.mode(), Mode::StockStreaming);
    assert_eq!(app.refresh_count(), 1);
}

#[test]
fn button_one_before_the_first_table_paints_nothing() {
    let latch = ButtonLatch::new();
    let mut app = GlanceApp::new(&latch, config());

    let _ = app.tick(monday_noon(0));
    assert!(app.fetch_pending());

    latch.press(ButtonEvent::Button1);
    assert_eq!(app.tick(monday_noon(500)), TickResult::NoRender);
    assert_eq!(app.mode(), Mode::StockStreaming);
}

#[test]
fn fresh_table_flushes_before_a_due_posture_sign() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    let _ = app.tick(monday_noon(301_000));
    assert!(app.fetch_pending());
    app.complete_stock_fetch(Ok(update_of(&[102.0, 251.0])), monday_noon(301_200));

    // The changed table gets its tick on screen first.
    assert_eq!(app.tick(monday_noon(301_200)), TickResult::RenderRequested);
    assert_eq!(screen_kind(&app), ScreenKind::StockTable);

    // The overdue reminder follows on the next tick.
    assert_eq!(app.tick(monday_noon(301_500)), TickResult::RenderRequested);
    assert_eq!(screen_kind(&app), ScreenKind::Posture);
}

#[test]
fn button_two_shows_the_clock_on_the_same_tick() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    latch.press(ButtonEvent::Button2);
    assert_eq!(
        app.tick(at(1_000, Weekday::Monday, 14, 58)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::Clock(14, 58));
    assert_eq!(app.mode(), Mode::Clock);
}

#[test]
fn clock_advances_in_three_minute_steps_across_the_hour() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    latch.press(ButtonEvent::Button2);
    let _ = app.tick(at(1_000, Weekday::Monday, 14, 58));

    // 58 + 3 wraps to minute 1 of the next hour.
    assert_eq!(
        app.tick(at(61_000, Weekday::Monday, 14, 59)),
        TickResult::NoRender
    );
    assert_eq!(
        app.tick(at(121_000, Weekday::Monday, 15, 0)),
        TickResult::NoRender
    );
    assert_eq!(
        app.tick(at(181_000, Weekday::Monday, 15, 1)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::Clock(15, 1));

    assert_eq!(
        app.tick(at(361_000, Weekday::Monday, 15, 4)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::Clock(15, 4));
}

#[test]
fn null_mode_acknowledges_and_then_stays_dark() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    latch.press(ButtonEvent::Button4);
    assert_eq!(app.tick(monday_noon(1_000)), TickResult::RenderRequested);
    assert_eq!(screen_kind(&app), ScreenKind::ButtonAck);
    assert_eq!(app.mode(), Mode::Null);

    // No cadence runs in null mode, however long it sits.
    for uptime in [2_000_u64, 400_000, 2_000_000] {
        assert_eq!(app.tick(monday_noon(uptime)), TickResult::NoRender);
        assert!(!app.fetch_pending());
    }
    assert_eq!(app.refresh_count(), 1);
}

#[test]
fn button_during_dwell_cancels_the_restore() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config());

    let _ = app.tick(at(301_000, Weekday::Saturday, 12, 0));
    let _ = app.tick(at(301_500, Weekday::Saturday, 12, 0));
    assert_eq!(screen_kind(&app), ScreenKind::Posture);

    latch.press(ButtonEvent::Button1);
    assert_eq!(
        app.tick(at(302_000, Weekday::Saturday, 12, 0)),
        TickResult::RenderRequested
    );
    assert_eq!(screen_kind(&app), ScreenKind::StockTable);

    // The dwell restore must not fire later and double-paint.
    assert_eq!(
        app.tick(at(307_000, Weekday::Saturday, 12, 0)),
        TickResult::NoRender
    );
}

#[test]
fn fetch_finished_after_a_mode_switch_leaves_the_screen_alone() {
    let latch = ButtonLatch::new();
    let mut app = booted(&latch, config().with_posture_refresh_secs(100_000));

    let _ = app.tick(monday_noon(301_000));
    assert!(app.fetch_pending());

    latch.press(ButtonEvent::Button2);
    let _ = app.tick(at(301_500, Weekday::Monday, 12, 0));
    assert_eq!(app.mode(), Mode::Clock);

    app.complete_stock_fetch(Ok(update_of(&[110.0, 260.0])), monday_noon(302_000));
    assert!(matches!(screen_kind(&app), ScreenKind::Clock(..)));
}
