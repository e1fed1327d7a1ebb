//! Compiled-in controller configuration.

use heapless::Vec;
use log::warn;

use crate::quote::MAX_SYMBOLS;

/// Default minimum seconds between stock refetches.
pub const STOCK_REFRESH_SECS: u64 = 300;
/// Default minimum seconds between posture reminders.
pub const POSTURE_REFRESH_SECS: u64 = 300;
/// How long the posture sign stays up before the stock frame is restored.
pub const POSTURE_DWELL_MS: u64 = 5_000;
/// Clock-face refresh stride in minutes.
pub const CLOCK_STEP_MINUTES: u8 = 3;

/// Startup configuration failures; all fatal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// No symbols configured; the device would have nothing to show.
    NoSymbols,
}

/// Controller configuration, built once at boot and owned by the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickerConfig {
    symbols: Vec<&'static str, MAX_SYMBOLS>,
    pub stock_refresh_secs: u64,
    pub posture_refresh_secs: u64,
    pub posture_dwell_ms: u64,
    pub clock_step_minutes: u8,
}

impl TickerConfig {
    /// Builds a config from the compiled-in symbol list.
    ///
    /// Lists longer than [`MAX_SYMBOLS`] are truncated (the panel fits six
    /// rows); an empty list is a fatal configuration error.
    pub fn new(symbols: &'static [&'static str]) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }

        if symbols.len() > MAX_SYMBOLS {
            warn!(
                "symbol list too long ({}); truncating to {}",
                symbols.len(),
                MAX_SYMBOLS
            );
        }

        let mut kept = Vec::new();
        for symbol in symbols.iter().take(MAX_SYMBOLS) {
            let _ = kept.push(*symbol);
        }

        Ok(Self {
            symbols: kept,
            stock_refresh_secs: STOCK_REFRESH_SECS,
            posture_refresh_secs: POSTURE_REFRESH_SECS,
            posture_dwell_ms: POSTURE_DWELL_MS,
            clock_step_minutes: CLOCK_STEP_MINUTES,
        })
    }

    pub fn symbols(&self) -> &[&'static str] {
        &self.symbols
    }

    pub fn with_stock_refresh_secs(mut self, secs: u64) -> Self {
        self.stock_refresh_secs = secs;
        self
    }

    pub fn with_posture_refresh_secs(mut self, secs: u64) -> Self {
        self.posture_refresh_secs = secs;
        self
    }

    pub fn with_posture_dwell_ms(mut self, ms: u64) -> Self {
        self.posture_dwell_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_symbol_list_is_fatal() {
        assert_eq!(TickerConfig::new(&[]), Err(ConfigError::NoSymbols));
    }

    #[test]
    fn long_symbol_list_is_truncated_to_six() {
        let config =
            TickerConfig::new(&["A", "B", "C", "D", "E", "F", "G", "H"]).unwrap();
        assert_eq!(config.symbols(), &["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn defaults_match_design_constants() {
        let config = TickerConfig::new(&["AAPL"]).unwrap();
        assert_eq!(config.stock_refresh_secs, 300);
        assert_eq!(config.posture_refresh_secs, 300);
        assert_eq!(config.posture_dwell_ms, 5_000);
        assert_eq!(config.clock_step_minutes, 3);
    }
}
