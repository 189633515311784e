// =============================================================================
// Market data types — daily OHLCV bars
// =============================================================================
//
// The engine consumes an already-retrieved, chronologically ascending series
// of daily bars for a single symbol (one bar per trading session). Retrieval
// is the caller's job; nothing in this crate performs I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Check that every price field is a finite number.
    ///
    /// Returns a message naming the offending field and session date so the
    /// engine boundary can wrap it into a structured error.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Err(format!("{} is not finite on {}", name, self.date));
            }
        }
        Ok(())
    }
}

/// Extract the closing prices from a bar series (oldest-first order).
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Close price of the most recent bar, if any.
pub fn latest_close(bars: &[PriceBar]) -> Option<f64> {
    bars.last().map(|b| b.close)
}
