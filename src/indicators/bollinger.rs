// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = SMA(period); upper/lower = middle ± num_std * σ, where σ is
// the POPULATION standard deviation of the trailing window (divide by N,
// not N-1). The population convention is applied consistently everywhere
// band values are produced or tested.

use crate::indicators::sma::calculate_sma;

/// Result of a Bollinger Band calculation for the latest close.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the trailing `period` closes.
///
/// Returns `None` when:
/// - `period` is zero or fewer than `period` closes are available.
/// - Any band value is non-finite.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> Option<BollingerBands> {
    let middle = calculate_sma(closes, period)?;

    let window = &closes[closes.len() - period..];
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;

    if upper.is_finite() && lower.is_finite() {
        Some(BollingerBands {
            upper,
            middle,
            lower,
        })
    } else {
        None
    }
}
