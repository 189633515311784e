// =============================================================================
// Portfolio Valuation — per-holding and aggregate P&L
// =============================================================================
//
// Values a set of holdings against externally-supplied price quotes.
// Storage of holdings and retrieval of quotes are the caller's job; a
// holding whose quote is missing is valued at price zero rather than
// failing the whole valuation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::round2;

/// A position held in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
}

/// Latest and previous-session close for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub current_price: f64,
    pub prev_close: f64,
}

/// Valuation of a single holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
    pub current_price: f64,
    pub position_value: f64,
    pub position_cost: f64,
    pub unrealized_pnl: f64,
    pub daily_pnl: f64,
}

/// Aggregate valuation of the whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub holdings: Vec<PositionReport>,
    pub total_value: f64,
    pub total_cost: f64,
    pub daily_pnl: f64,
    pub total_unrealized_pnl: f64,
}

/// Value every holding against `quotes` and aggregate the totals.
///
/// Holdings keep their input order. An empty holdings slice produces a
/// report with zeroed totals.
pub fn value(holdings: &[Holding], quotes: &HashMap<String, PriceQuote>) -> PortfolioReport {
    let mut reports = Vec::with_capacity(holdings.len());
    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    let mut daily_pnl = 0.0;

    for holding in holdings {
        let quote = quotes.get(&holding.symbol).copied().unwrap_or_else(|| {
            warn!(symbol = %holding.symbol, "no quote for holding, valuing at zero");
            PriceQuote {
                current_price: 0.0,
                prev_close: 0.0,
            }
        });

        let position_value = quote.current_price * holding.shares;
        let position_cost = holding.avg_cost * holding.shares;
        let position_daily = (quote.current_price - quote.prev_close) * holding.shares;

        total_value += position_value;
        total_cost += position_cost;
        daily_pnl += position_daily;

        reports.push(PositionReport {
            symbol: holding.symbol.clone(),
            shares: holding.shares,
            avg_cost: holding.avg_cost,
            current_price: round2(quote.current_price),
            position_value: round2(position_value),
            position_cost: round2(position_cost),
            unrealized_pnl: round2(position_value - position_cost),
            daily_pnl: round2(position_daily),
        });
    }

    PortfolioReport {
        holdings: reports,
        total_value: round2(total_value),
        total_cost: round2(total_cost),
        daily_pnl: round2(daily_pnl),
        total_unrealized_pnl: round2(total_value - total_cost),
    }
}
