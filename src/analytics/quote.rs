// =============================================================================
// Quote Snapshot — latest price, change and trailing-range summary
// =============================================================================
//
// Summarises an already-retrieved daily bar series for display: latest
// close, day-over-day change, the trailing 52-week high/low and the most
// recent candles rounded for presentation. One trading year is taken as
// 252 sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::round2;
use crate::error::EngineError;
use crate::market_data::PriceBar;

/// Trading sessions in one year, used for the 52-week range.
const SESSIONS_PER_YEAR: usize = 252;

/// A bar rounded for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSummary {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Display-ready summary of a symbol's recent trading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub current_price: f64,
    pub change_pct: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub volume: u64,
    pub recent_candles: Vec<CandleSummary>,
}

/// Build a quote snapshot from `bars`, echoing the last `tail` candles.
///
/// Fails only on an empty series. With a single bar the previous close
/// falls back to the latest close, reporting a 0% change.
pub fn snapshot(symbol: &str, bars: &[PriceBar], tail: usize) -> Result<QuoteSnapshot, EngineError> {
    let symbol = symbol.to_uppercase();

    let Some(latest) = bars.last() else {
        return Err(EngineError::NoData { symbol });
    };

    let prev_close = if bars.len() > 1 {
        bars[bars.len() - 2].close
    } else {
        latest.close
    };
    let change_pct = if prev_close.abs() > f64::EPSILON {
        ((latest.close - prev_close) / prev_close) * 100.0
    } else {
        0.0
    };

    let year = &bars[bars.len().saturating_sub(SESSIONS_PER_YEAR)..];
    let high = year.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = year.iter().map(|b| b.low).fold(f64::MAX, f64::min);

    let recent_candles = bars[bars.len().saturating_sub(tail)..]
        .iter()
        .map(|b| CandleSummary {
            date: b.date,
            open: round2(b.open),
            high: round2(b.high),
            low: round2(b.low),
            close: round2(b.close),
            volume: b.volume,
        })
        .collect();

    Ok(QuoteSnapshot {
        symbol,
        current_price: round2(latest.close),
        change_pct: round2(change_pct),
        fifty_two_week_high: round2(high),
        fifty_two_week_low: round2(low),
        volume: latest.volume,
        recent_candles,
    })
}

/// Build a quote snapshot with the candle tail length from `config`.
pub fn snapshot_with_config(
    symbol: &str,
    bars: &[PriceBar],
    config: &EngineConfig,
) -> Result<QuoteSnapshot, EngineError> {
    snapshot(symbol, bars, config.quote_tail)
}
