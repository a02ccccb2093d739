use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TradeSide;
use crate::values::{Price, PropertyId, ShareCount, Timestamp, TradeId, UserId};

/// Ledger entry recording an executed trade
///
/// Entries are immutable once created; the ledger only ever appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: TradeId,
    /// The user on whose behalf the entry was recorded
    pub user_id: UserId,
    /// The property whose shares changed hands
    pub property_id: PropertyId,
    pub side: TradeSide,
    pub shares: ShareCount,
    /// Price per share at execution
    pub price: Price,
    pub timestamp: Timestamp,
}

impl TradeRecord {
    /// Create a new entry with explicit timestamp
    pub fn new_with_time(
        user_id: UserId,
        property_id: impl Into<PropertyId>,
        side: TradeSide,
        shares: ShareCount,
        price: Price,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            property_id: property_id.into(),
            side,
            shares,
            price,
            timestamp,
        }
    }

    /// Create a new entry using current system time
    /// Note: engine code should prefer `new_with_time` with clock-provided time
    pub fn new(
        user_id: UserId,
        property_id: impl Into<PropertyId>,
        side: TradeSide,
        shares: ShareCount,
        price: Price,
    ) -> Self {
        Self::new_with_time(user_id, property_id, side, shares, price, Utc::now())
    }

    /// Returns the notional value of the entry (shares * price)
    pub fn notional(&self) -> Price {
        Decimal::from(self.shares) * self.price
    }

    pub fn is_buy(&self) -> bool {
        self.side == TradeSide::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.side == TradeSide::Sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_notional() {
        let entry = TradeRecord::new(Uuid::new_v4(), "PROP00001", TradeSide::Buy, 40, dec!(50));
        assert_eq!(entry.notional(), dec!(2000));
        assert!(entry.is_buy());
        assert!(!entry.is_sell());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(TradeSide::Buy.opposite(), TradeSide::Sell);
        assert_eq!(TradeSide::Sell.opposite(), TradeSide::Buy);
    }
}
