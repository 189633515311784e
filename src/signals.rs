// =============================================================================
// Signal Derivation — ordered table of independent rule evaluators
// =============================================================================
//
// Each rule inspects the latest indicator snapshot and contributes zero or
// one message. Rules are evaluated in the fixed table order below and know
// nothing about each other, so a rule can be unit-tested on its own and new
// rules append to the table without touching existing logic.
//
// Rule order: RSI level, MACD cross, SMA50/200 cross, Bollinger breakout.

use crate::engine::IndicatorSet;

/// Everything a rule may look at. Values are the already-rounded snapshot
/// the engine reports, so messages quote exactly what the caller sees.
#[derive(Debug, Clone)]
pub struct SignalContext<'a> {
    pub indicators: &'a IndicatorSet,
    pub current_price: f64,
    /// RSI level above which rule 1 reads OVERBOUGHT (strict compare).
    pub rsi_overbought: f64,
    /// RSI level below which rule 1 reads OVERSOLD (strict compare).
    pub rsi_oversold: f64,
}

/// A single signal rule: a stable id plus an independent evaluator.
pub struct SignalRule {
    pub id: &'static str,
    pub eval: fn(&SignalContext) -> Option<String>,
}

/// The fixed rule table. Output order of [`derive`] follows this order.
pub const RULES: &[SignalRule] = &[
    SignalRule {
        id: "rsi-level",
        eval: rsi_level,
    },
    SignalRule {
        id: "macd-cross",
        eval: macd_cross,
    },
    SignalRule {
        id: "sma-cross",
        eval: sma_cross,
    },
    SignalRule {
        id: "bollinger-breakout",
        eval: bollinger_breakout,
    },
];

/// Fallback summary when no rule can fire (insufficient history).
pub const INSUFFICIENT_DATA: &str = "Insufficient data for signals";

/// Evaluate every rule in table order and collect the messages that fired.
pub fn derive(ctx: &SignalContext) -> Vec<String> {
    RULES.iter().filter_map(|rule| (rule.eval)(ctx)).collect()
}

/// Join derived signals into the one-line summary.
pub fn summarize(signals: &[String]) -> String {
    if signals.is_empty() {
        INSUFFICIENT_DATA.to_string()
    } else {
        signals.join("; ")
    }
}

// =============================================================================
// Rule evaluators
// =============================================================================

/// Rule 1 — RSI level. Emits exactly one message whenever RSI is present.
fn rsi_level(ctx: &SignalContext) -> Option<String> {
    let rsi = ctx.indicators.rsi_14?;
    let msg = if rsi > ctx.rsi_overbought {
        format!("RSI({rsi}) indicates OVERBOUGHT")
    } else if rsi < ctx.rsi_oversold {
        format!("RSI({rsi}) indicates OVERSOLD")
    } else {
        format!("RSI({rsi}) is neutral")
    };
    Some(msg)
}

/// Rule 2 — MACD line vs signal line. Needs both values.
fn macd_cross(ctx: &SignalContext) -> Option<String> {
    let macd = ctx.indicators.macd?;
    let signal = ctx.indicators.macd_signal?;
    let msg = if macd > signal {
        "MACD is above signal line (bullish)"
    } else {
        "MACD is below signal line (bearish)"
    };
    Some(msg.to_string())
}

/// Rule 3 — golden/death cross. Fires only when SMA200 is available.
fn sma_cross(ctx: &SignalContext) -> Option<String> {
    let sma_50 = ctx.indicators.sma_50?;
    let sma_200 = ctx.indicators.sma_200?;
    let msg = if sma_50 > sma_200 {
        "Golden cross: SMA50 above SMA200 (bullish)"
    } else {
        "Death cross: SMA50 below SMA200 (bearish)"
    };
    Some(msg.to_string())
}

/// Rule 4 — Bollinger breakout. The only rule that may contribute nothing
/// even when its inputs are present.
fn bollinger_breakout(ctx: &SignalContext) -> Option<String> {
    let upper = ctx.indicators.bollinger_upper?;
    let lower = ctx.indicators.bollinger_lower?;
    if ctx.current_price > upper {
        Some("Price above upper Bollinger Band (overbought)".to_string())
    } else if ctx.current_price < lower {
        Some("Price below lower Bollinger Band (oversold)".to_string())
    } else {
        None
    }
}
