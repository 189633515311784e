// =============================================================================
// Price Alerts — threshold evaluation against latest prices
// =============================================================================
//
// Evaluates configured price alerts against externally-supplied latest
// prices. An `above` alert fires once the price reaches or exceeds its
// target; `below` fires at or under the target. Symbols without a usable
// price (missing or zero) are skipped rather than treated as triggered.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::round2;

/// Direction of a price alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

impl std::fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Above => write!(f, "above"),
            Self::Below => write!(f, "below"),
        }
    }
}

/// A configured price alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub symbol: String,
    pub condition: AlertCondition,
    pub price: f64,
}

/// An alert that fired, with the price that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredAlert {
    pub symbol: String,
    pub condition: AlertCondition,
    pub target_price: f64,
    pub current_price: f64,
}

/// Evaluate `alerts` against `prices` (symbol -> latest price).
///
/// Returns the triggered alerts in input order.
pub fn check(alerts: &[PriceAlert], prices: &HashMap<String, f64>) -> Vec<TriggeredAlert> {
    let mut triggered = Vec::new();

    for alert in alerts {
        let Some(&price) = prices.get(&alert.symbol) else {
            continue;
        };
        if price == 0.0 {
            continue;
        }

        let fired = match alert.condition {
            AlertCondition::Above => price >= alert.price,
            AlertCondition::Below => price <= alert.price,
        };

        if fired {
            triggered.push(TriggeredAlert {
                symbol: alert.symbol.clone(),
                condition: alert.condition,
                target_price: alert.price,
                current_price: round2(price),
            });
        }
    }

    triggered
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn alert(symbol: &str, condition: AlertCondition, price: f64) -> PriceAlert {
        PriceAlert {
            symbol: symbol.to_string(),
            condition,
            price,
        }
    }

    fn prices(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(s, p)| (s.to_string(), *p))
            .collect()
    }

    #[test]
    fn above_fires_at_or_over_target() {
        let alerts = vec![alert("AAPL", AlertCondition::Above, 150.0)];
        assert_eq!(check(&alerts, &prices(&[("AAPL", 150.0)])).len(), 1);
        assert_eq!(check(&alerts, &prices(&[("AAPL", 151.0)])).len(), 1);
        assert!(check(&alerts, &prices(&[("AAPL", 149.9)])).is_empty());
    }

    #[test]
    fn below_fires_at_or_under_target() {
        let alerts = vec![alert("AAPL", AlertCondition::Below, 100.0)];
        assert_eq!(check(&alerts, &prices(&[("AAPL", 100.0)])).len(), 1);
        assert_eq!(check(&alerts, &prices(&[("AAPL", 95.0)])).len(), 1);
        assert!(check(&alerts, &prices(&[("AAPL", 100.1)])).is_empty());
    }

    #[test]
    fn missing_price_skips_alert() {
        let alerts = vec![alert("GHOST", AlertCondition::Above, 1.0)];
        assert!(check(&alerts, &HashMap::new()).is_empty());
    }

    #[test]
    fn zero_price_skips_alert() {
        // Zero means the quote lookup failed upstream, not a real price.
        let alerts = vec![alert("HALT", AlertCondition::Below, 10.0)];
        assert!(check(&alerts, &prices(&[("HALT", 0.0)])).is_empty());
    }

    #[test]
    fn triggered_alert_carries_both_prices() {
        let alerts = vec![alert("TSLA", AlertCondition::Above, 200.0)];
        let fired = check(&alerts, &prices(&[("TSLA", 201.567)]));
        assert_eq!(fired[0].target_price, 200.0);
        assert_eq!(fired[0].current_price, 201.57);
        assert_eq!(fired[0].condition, AlertCondition::Above);
    }

    #[test]
    fn multiple_alerts_keep_input_order() {
        let alerts = vec![
            alert("B", AlertCondition::Above, 1.0),
            alert("A", AlertCondition::Above, 1.0),
        ];
        let fired = check(&alerts, &prices(&[("A", 2.0), ("B", 2.0)]));
        assert_eq!(fired[0].symbol, "B");
        assert_eq!(fired[1].symbol, "A");
    }

    #[test]
    fn condition_serialises_lowercase() {
        let json = serde_json::to_string(&AlertCondition::Above).unwrap();
        assert_eq!(json, r#""above""#);
        assert_eq!(AlertCondition::Above.to_string(), "above");
    }
}
