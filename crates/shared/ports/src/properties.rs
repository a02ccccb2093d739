use propshare_core::{Price, PropertyId, ShareCount};

use crate::error::StoreResult;

/// Port for the trading-relevant fields of the property catalog
///
/// The catalog itself (metadata, property lifecycle) is owned elsewhere;
/// the trading core reads `total_shares` and reads/writes `current_price`.
pub trait PropertyStore: Send + Sync {
    /// Whether the property is registered
    fn contains(&self, property: &PropertyId) -> bool;

    /// Current market price per share
    fn current_price(&self, property: &PropertyId) -> StoreResult<Price>;

    /// Persist a recomputed market price
    fn set_current_price(&self, property: &PropertyId, price: Price) -> StoreResult<()>;

    /// Total issued shares
    fn total_shares(&self, property: &PropertyId) -> StoreResult<ShareCount>;
}
