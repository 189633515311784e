// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators the analysis
// engine reports on.  Every public function is a stateless function of its
// input slice and returns `Option<T>` (or an empty `Vec` for series
// outputs) so callers are forced to handle insufficient-data and
// numerical-edge-case scenarios.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
