use propshare_core::{Price, ShareCount, TradeRecord};
use propshare_ports::PricingModel;
use rust_decimal::{Decimal, MathematicalOps};

/// Minimum window size for a stable estimate; smaller windows are a no-op
const MIN_WINDOW: usize = 5;

/// Demand/supply pressure model with a volatility premium
///
/// The new price moves off the most recent trade price by a pressure term
/// (normalized buy/sell volume imbalance over the window) and a volatility
/// term (coefficient of variation of window prices), then gets clamped to
/// a hard ±10% band around that trade price. With a positive input price
/// the output is always positive.
pub struct PressureVolatilityModel;

impl PressureVolatilityModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PressureVolatilityModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingModel for PressureVolatilityModel {
    fn name(&self) -> &str {
        "Pressure-Volatility"
    }

    fn recompute(&self, window: &[TradeRecord], pending_supply: ShareCount) -> Option<Price> {
        if window.len() < MIN_WINDOW {
            return None;
        }

        let demand: ShareCount = window.iter().filter(|t| t.is_buy()).map(|t| t.shares).sum();
        let supply: ShareCount = window
            .iter()
            .filter(|t| t.is_sell())
            .map(|t| t.shares)
            .sum::<ShareCount>()
            + pending_supply;

        if demand + supply == 0 {
            // No volume, no pressure signal
            return None;
        }

        // Normalized buy/sell imbalance in [-1, 1]
        let delta = (Decimal::from(demand) - Decimal::from(supply))
            / (Decimal::from(demand) + Decimal::from(supply));

        // Coefficient of variation of window prices; plain stddev would
        // scale with the price level
        let count = Decimal::from(window.len() as u64);
        let mean = window.iter().map(|t| t.price).sum::<Decimal>() / count;
        let variance = window
            .iter()
            .map(|t| {
                let diff = t.price - mean;
                diff * diff
            })
            .sum::<Decimal>()
            / count;
        let volatility = if mean > Decimal::ZERO {
            variance.sqrt().unwrap_or(Decimal::ZERO) / mean
        } else {
            Decimal::ZERO
        };

        let alpha = Decimal::new(5, 2); // pressure weight 0.05
        let beta = Decimal::new(2, 2); // volatility weight 0.02
        let band = Decimal::new(10, 2); // ±10% clamp per recomputation

        // The most recent trade anchors the move
        let previous = window[0].price;
        let raw = previous * (Decimal::ONE + alpha * delta + beta * volatility);

        let floor = previous * (Decimal::ONE - band);
        let ceiling = previous * (Decimal::ONE + band);
        Some(raw.clamp(floor, ceiling))
    }
}
