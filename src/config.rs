// =============================================================================
// Engine Configuration — indicator tunables with atomic save
// =============================================================================
//
// Every tunable parameter of the analysis engine lives here so embedding
// applications can reconfigure periods and thresholds without a rebuild.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal_period() -> usize {
    9
}

fn default_sma_short() -> usize {
    20
}

fn default_sma_mid() -> usize {
    50
}

fn default_sma_long() -> usize {
    200
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_std() -> f64 {
    2.0
}

fn default_atr_period() -> usize {
    14
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_quote_tail() -> usize {
    10
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Tunable parameters for the analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Look-back window for RSI.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Fast EMA period for the MACD line.
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    /// Slow EMA period for the MACD line.
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    /// EMA period for the MACD signal line.
    #[serde(default = "default_macd_signal_period")]
    pub macd_signal_period: usize,

    /// Short / mid / long SMA windows (20 / 50 / 200 by convention; the
    /// long window also gates the golden/death-cross rule).
    #[serde(default = "default_sma_short")]
    pub sma_short: usize,

    #[serde(default = "default_sma_mid")]
    pub sma_mid: usize,

    #[serde(default = "default_sma_long")]
    pub sma_long: usize,

    /// Bollinger Band window.
    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Bollinger Band width in population standard deviations.
    #[serde(default = "default_bollinger_std")]
    pub bollinger_std: f64,

    /// Look-back window for ATR.
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,

    /// RSI level above which the level rule reads OVERBOUGHT.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// RSI level below which the level rule reads OVERSOLD.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    /// Number of recent candles echoed in a quote snapshot.
    #[serde(default = "default_quote_tail")]
    pub quote_tail: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal_period: default_macd_signal_period(),
            sma_short: default_sma_short(),
            sma_mid: default_sma_mid(),
            sma_long: default_sma_long(),
            bollinger_period: default_bollinger_period(),
            bollinger_std: default_bollinger_std(),
            atr_period: default_atr_period(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            quote_tail: default_quote_tail(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            rsi_period = config.rsi_period,
            sma_long = config.sma_long,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}
