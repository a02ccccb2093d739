use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::values::{ListingId, Price, PropertyId, ShareCount, Timestamp, UserId};

/// An open sell offer for a fixed quantity of a property's shares
///
/// `shares` is positive for as long as the listing exists; partial fills
/// reduce it and the book deletes the listing once it reaches zero.
/// `seller_id` is a back-reference for settlement credit, not an ownership
/// edge: the listed shares already left the seller's holding when the
/// listing was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellListing {
    pub id: ListingId,
    pub property_id: PropertyId,
    pub seller_id: UserId,
    /// Shares still for sale
    pub shares: ShareCount,
    pub price_per_share: Price,
    pub created_at: Timestamp,
}

impl SellListing {
    /// Create a new listing with an explicit creation time
    pub fn new_with_time(
        property_id: impl Into<PropertyId>,
        seller_id: UserId,
        shares: ShareCount,
        price_per_share: Price,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id: property_id.into(),
            seller_id,
            shares,
            price_per_share,
            created_at,
        }
    }

    /// Create a new listing using current system time
    /// Note: engine code should prefer `new_with_time` with clock-provided time
    pub fn new(
        property_id: impl Into<PropertyId>,
        seller_id: UserId,
        shares: ShareCount,
        price_per_share: Price,
    ) -> Self {
        Self::new_with_time(property_id, seller_id, shares, price_per_share, Utc::now())
    }

    /// Cost of buying `shares` from this listing at its fixed price
    pub fn cost_of(&self, shares: ShareCount) -> Price {
        Decimal::from(shares) * self.price_per_share
    }

    /// Notional value of the remaining shares
    pub fn notional(&self) -> Price {
        self.cost_of(self.shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cost_of() {
        let listing = SellListing::new("PROP00001", Uuid::new_v4(), 100, dec!(50));

        assert_eq!(listing.cost_of(40), dec!(2000));
        assert_eq!(listing.notional(), dec!(5000));
    }
}
