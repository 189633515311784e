// =============================================================================
// Analysis Engine — latest-bar indicator snapshot + signal summary
// =============================================================================
//
// The engine is a pure function of its input series: validate the bars,
// compute every indicator for the most recent bar, round to two decimals,
// then run the signal rule table over the snapshot. Indicators whose
// warm-up window is not met report `None` and contribute no signal; only an
// empty series or malformed bar data aborts the whole computation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::indicators::{atr, bollinger, macd, rsi, sma};
use crate::market_data::{self, PriceBar};
use crate::signals::{self, SignalContext};

/// Computed indicator snapshot for the latest bar. Absent fields mean the
/// indicator's warm-up window was not met; present values are rounded to
/// two decimals. Field names match the JSON the embedding API serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub atr_14: Option<f64>,
}

/// Full analysis result for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub current_price: f64,
    pub indicators: IndicatorSet,
    pub signal_summary: String,
}

/// Round to two decimal places, the precision every reported value carries.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Analyse `bars` for `symbol` with default parameters.
pub fn analyze(symbol: &str, bars: &[PriceBar]) -> Result<AnalysisReport, EngineError> {
    analyze_with_config(symbol, bars, &EngineConfig::default())
}

/// Analyse `bars` for `symbol` with explicit engine parameters.
///
/// Fails only on an empty series or a bar with non-finite price data;
/// unmet warm-up windows degrade to absent indicator fields.
pub fn analyze_with_config(
    symbol: &str,
    bars: &[PriceBar],
    config: &EngineConfig,
) -> Result<AnalysisReport, EngineError> {
    let symbol = symbol.to_uppercase();

    let Some(latest_close) = market_data::latest_close(bars) else {
        return Err(EngineError::NoData { symbol });
    };

    for bar in bars {
        bar.validate()
            .map_err(|message| EngineError::MalformedBar { message })?;
    }

    let closes = market_data::closes(bars);

    let rsi_14 = rsi::latest_rsi(&closes, config.rsi_period).map(round2);

    let (macd_line, macd_signal, macd_histogram) = match macd::calculate_macd(
        &closes,
        config.macd_fast,
        config.macd_slow,
        config.macd_signal_period,
    ) {
        Some(m) => (
            Some(round2(m.macd)),
            m.signal.map(round2),
            m.histogram.map(round2),
        ),
        None => (None, None, None),
    };

    let sma_20 = sma::calculate_sma(&closes, config.sma_short).map(round2);
    let sma_50 = sma::calculate_sma(&closes, config.sma_mid).map(round2);
    let sma_200 = sma::calculate_sma(&closes, config.sma_long).map(round2);

    let bands = bollinger::calculate_bollinger(&closes, config.bollinger_period, config.bollinger_std);
    let (bollinger_upper, bollinger_middle, bollinger_lower) = match bands {
        Some(bb) => (
            Some(round2(bb.upper)),
            Some(round2(bb.middle)),
            Some(round2(bb.lower)),
        ),
        None => (None, None, None),
    };

    let atr_14 = atr::calculate_atr(bars, config.atr_period).map(round2);

    let indicators = IndicatorSet {
        rsi_14,
        macd: macd_line,
        macd_signal,
        macd_histogram,
        sma_20,
        sma_50,
        sma_200,
        bollinger_upper,
        bollinger_middle,
        bollinger_lower,
        atr_14,
    };

    let current_price = round2(latest_close);

    debug!(
        symbol = %symbol,
        bars = bars.len(),
        current_price,
        rsi_14 = ?indicators.rsi_14,
        sma_200 = ?indicators.sma_200,
        "indicator snapshot computed"
    );

    let ctx = SignalContext {
        indicators: &indicators,
        current_price,
        rsi_overbought: config.rsi_overbought,
        rsi_oversold: config.rsi_oversold,
    };
    let signal_summary = signals::summarize(&signals::derive(&ctx));

    Ok(AnalysisReport {
        symbol,
        current_price,
        indicators,
        signal_summary,
    })
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Daily bars with the given closes; high/low hug the close so flat
    /// close series also have zero true range.
    fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000_000,
            })
            .collect()
    }

    #[test]
    fn empty_series_is_no_data_error() {
        let err = analyze("qqq", &[]).unwrap_err();
        assert_eq!(err.to_string(), "No data found for QQQ");
    }

    #[test]
    fn malformed_bar_is_caught_at_boundary() {
        let mut bars = bars_from_closes(&[100.0, 101.0, 102.0]);
        bars[1].low = f64::NAN;
        let err = analyze("AAPL", &bars).unwrap_err();
        assert!(matches!(err, EngineError::MalformedBar { .. }));
    }

    #[test]
    fn constant_series_fixed_point() {
        let bars = bars_from_closes(&vec![150.0; 220]);
        let report = analyze("SPY", &bars).unwrap();
        let ind = &report.indicators;

        assert_eq!(ind.rsi_14, Some(50.0));
        assert_eq!(ind.macd, Some(0.0));
        assert_eq!(ind.macd_signal, Some(0.0));
        assert_eq!(ind.macd_histogram, Some(0.0));
        assert_eq!(ind.sma_20, Some(150.0));
        assert_eq!(ind.sma_50, Some(150.0));
        assert_eq!(ind.sma_200, Some(150.0));
        assert_eq!(ind.bollinger_upper, Some(150.0));
        assert_eq!(ind.bollinger_middle, Some(150.0));
        assert_eq!(ind.bollinger_lower, Some(150.0));
        assert_eq!(ind.atr_14, Some(0.0));
        assert_eq!(report.current_price, 150.0);
    }

    #[test]
    fn constant_series_signal_summary() {
        let bars = bars_from_closes(&vec![150.0; 220]);
        let report = analyze("SPY", &bars).unwrap();
        // Neutral RSI, bearish MACD tie, death-cross tie; no breakout when
        // price sits exactly on the collapsed bands.
        assert_eq!(
            report.signal_summary,
            "RSI(50) is neutral; MACD is below signal line (bearish); \
             Death cross: SMA50 below SMA200 (bearish)"
        );
    }

    #[test]
    fn monotonic_series_rsi_100_and_golden_cross() {
        let closes: Vec<f64> = (1..=250).map(|x| x as f64).collect();
        let report = analyze("NVDA", &bars_from_closes(&closes)).unwrap();
        let ind = &report.indicators;

        assert_eq!(ind.rsi_14, Some(100.0));
        // Trailing-50 mean beats trailing-200 mean in a steady uptrend.
        assert!(ind.sma_50.unwrap() > ind.sma_200.unwrap());
        assert!(report.signal_summary.contains("Golden cross"));
        assert!(!report.signal_summary.contains("Death cross"));
    }

    #[test]
    fn descending_series_death_cross() {
        let closes: Vec<f64> = (1..=250).rev().map(|x| x as f64).collect();
        let report = analyze("NVDA", &bars_from_closes(&closes)).unwrap();
        assert!(report.signal_summary.contains("Death cross"));
    }

    #[test]
    fn five_bars_all_null_insufficient_summary() {
        let bars = bars_from_closes(&[10.0, 11.0, 12.0, 11.5, 12.5]);
        let report = analyze("IPO", &bars).unwrap();
        let ind = &report.indicators;

        assert_eq!(ind.rsi_14, None);
        assert_eq!(ind.macd, None);
        assert_eq!(ind.macd_signal, None);
        assert_eq!(ind.macd_histogram, None);
        assert_eq!(ind.sma_20, None);
        assert_eq!(ind.sma_50, None);
        assert_eq!(ind.sma_200, None);
        assert_eq!(ind.bollinger_upper, None);
        assert_eq!(ind.bollinger_middle, None);
        assert_eq!(ind.bollinger_lower, None);
        assert_eq!(ind.atr_14, None);
        assert_eq!(report.signal_summary, "Insufficient data for signals");
    }

    #[test]
    fn sma200_boundary_at_exactly_200_bars() {
        let closes: Vec<f64> = (1..=200).map(|x| x as f64).collect();
        let report = analyze("BND", &bars_from_closes(&closes)).unwrap();
        assert!(report.indicators.sma_200.is_some());

        let report = analyze("BND", &bars_from_closes(&closes[..199])).unwrap();
        assert!(report.indicators.sma_200.is_none());
        // With SMA200 absent the cross rule must not fire.
        assert!(!report.signal_summary.contains("cross"));
    }

    #[test]
    fn analysis_is_deterministic() {
        let closes: Vec<f64> = (0..260)
            .map(|i| 100.0 + (i as f64 * 0.31).sin() * 12.0 + i as f64 * 0.05)
            .collect();
        let bars = bars_from_closes(&closes);

        let a = analyze("MSFT", &bars).unwrap();
        let b = analyze("MSFT", &bars).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn symbol_is_uppercased_and_price_echoed() {
        let bars = bars_from_closes(&[10.0, 10.555]);
        let report = analyze("tsla", &bars).unwrap();
        assert_eq!(report.symbol, "TSLA");
        assert_eq!(report.current_price, 10.56);
    }

    #[test]
    fn absent_indicators_serialize_as_null() {
        let bars = bars_from_closes(&vec![42.0; 30]);
        let report = analyze("ETF", &bars).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        // 30 bars: RSI present, SMA200 absent.
        assert!(json["indicators"]["rsi_14"].is_number());
        assert!(json["indicators"]["sma_200"].is_null());
    }

    #[test]
    fn signal_order_is_fixed_when_all_fire() {
        // Uptrend with a final spike above the upper band: all four rules
        // fire, in table order.
        let mut closes: Vec<f64> = (1..=249).map(|x| 100.0 + x as f64 * 0.5).collect();
        closes.push(400.0);
        let report = analyze("MOON", &bars_from_closes(&closes)).unwrap();

        let summary = &report.signal_summary;
        let rsi_pos = summary.find("RSI(").unwrap();
        let macd_pos = summary.find("MACD is").unwrap();
        let cross_pos = summary.find("cross:").unwrap();
        let bb_pos = summary.find("Bollinger Band").unwrap();
        assert!(rsi_pos < macd_pos && macd_pos < cross_pos && cross_pos < bb_pos);
    }

    #[test]
    fn custom_config_changes_windows() {
        let mut config = EngineConfig::default();
        config.sma_mid = 5;
        config.sma_long = 10;
        let bars = bars_from_closes(&(1..=30).map(|x| x as f64).collect::<Vec<_>>());
        let report = analyze_with_config("X", &bars, &config).unwrap();
        // Both cross windows are met by 30 bars, so the cross rule fires.
        assert!(report.indicators.sma_200.is_some());
        assert!(report.signal_summary.contains("cross"));
    }
}
