// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line  = EMA(fast) - EMA(slow)
// Signal     = EMA(signal_period) of the MACD line
// Histogram  = MACD line - Signal
//
// Standard parameters are (12, 26, 9). The MACD line exists once `slow`
// closes are available; the signal line needs `signal_period` MACD values on
// top of that (34 closes with standard parameters), so it can lag behind
// the line itself during warm-up.

use crate::indicators::ema::calculate_ema;

/// Latest MACD snapshot.
///
/// `signal` and `histogram` are `None` while the signal line is still
/// warming up.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Compute the MACD line series: EMA(fast) - EMA(slow), aligned on the
/// first close where both EMAs exist.
///
/// Returns an empty `Vec` when either period is zero, `fast >= slow`, or
/// there are fewer than `slow` closes.
pub fn calculate_macd_line(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    if fast == 0 || slow == 0 || fast >= slow || closes.len() < slow {
        return Vec::new();
    }

    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    // The fast series starts `slow - fast` closes earlier than the slow one;
    // drop its head so both series index the same close.
    let offset = slow - fast;
    if ema_fast.len() < offset {
        return Vec::new();
    }

    ema_fast[offset..]
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect()
}

/// Compute the latest MACD line, signal line and histogram.
///
/// Returns `None` when the MACD line itself is not computable. `signal` and
/// `histogram` inside the result are `None` until `signal_period` MACD
/// values exist.
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<MacdResult> {
    let line = calculate_macd_line(closes, fast, slow);
    let macd = *line.last()?;

    let signal = calculate_ema(&line, signal_period).last().copied();
    let histogram = signal.map(|s| macd - s);

    Some(MacdResult {
        macd,
        signal,
        histogram,
    })
}
