// =============================================================================
// stockpulse — market analysis engine
// =============================================================================
//
// Technical indicators, signal derivation and portfolio analytics over
// already-retrieved daily price data. The crate is pure and synchronous:
// data retrieval, persistence and presentation belong to the embedding
// application, which may call the engine concurrently for different
// symbols without coordination.

pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod signals;

pub use config::EngineConfig;
pub use engine::{analyze, analyze_with_config, AnalysisReport, IndicatorSet};
pub use error::EngineError;
pub use market_data::PriceBar;
