// =============================================================================
// Engine error taxonomy
// =============================================================================
//
// Only two things abort an analysis outright: an empty input series and a
// bar that fails validation. Everything else (unmet warm-up windows,
// degenerate divisions) degrades to absent fields inside the indicator
// functions and never surfaces here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The input series was empty — no partial output is produced.
    #[error("No data found for {symbol}")]
    NoData { symbol: String },

    /// A bar in the input series carried non-finite price data. Caught at
    /// the engine boundary before any indicator runs.
    #[error("malformed bar data: {message}")]
    MalformedBar { message: String },
}
