use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::values::{Price, PropertyId, ShareCount, Timestamp};

/// Catalog record for a registered property
///
/// The catalog (metadata, listing lifecycle) is owned outside the trading
/// core; the core reads `total_shares` and reads/writes `current_price`,
/// which stays positive as long as it starts positive (recomputation is
/// band-limited around the last trade price).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub property_id: PropertyId,
    pub name: String,
    /// Total issued shares, fixed at registration
    pub total_shares: ShareCount,
    /// Market price per share, moved only by the pricing model
    pub current_price: Price,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PropertyRecord {
    /// Create a new record with an explicit creation time
    pub fn new_with_time(
        property_id: impl Into<PropertyId>,
        name: impl Into<String>,
        total_shares: ShareCount,
        initial_price: Price,
        now: Timestamp,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            name: name.into(),
            total_shares,
            current_price: initial_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new record using current system time
    pub fn new(
        property_id: impl Into<PropertyId>,
        name: impl Into<String>,
        total_shares: ShareCount,
        initial_price: Price,
    ) -> Self {
        Self::new_with_time(property_id, name, total_shares, initial_price, Utc::now())
    }

    /// Persist a recomputed market price
    pub fn set_price(&mut self, price: Price) {
        self.current_price = price;
        self.updated_at = Utc::now();
    }
}
