// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Plain arithmetic mean of the last `period` closes. The engine reports
// SMA(20), SMA(50) and SMA(200) snapshots for trend and cross detection.

/// Compute the SMA over the trailing `period` closes.
///
/// Returns `None` when:
/// - `period` is zero.
/// - Fewer than `period` data points are available.
/// - The mean is non-finite (poisoned input).
pub fn calculate_sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;

    if mean.is_finite() {
        Some(mean)
    } else {
        None
    }
}
