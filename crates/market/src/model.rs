use propshare_core::{Price, PropertyId, SellListing, TradeRecord};
use serde::Serialize;

/// Events emitted by the market as operations commit
///
/// Note: this stays in the market crate as it's application/infrastructure
/// level. Embedding layers subscribe for notifications and serialize the
/// payloads outward; the engine never depends on a consumer being present.
#[derive(Debug, Clone, Serialize)]
pub enum MarketEvent {
    /// A sell listing was created and its shares reserved
    ListingCreated(SellListing),

    /// A buy executed against a listing
    TradeExecuted(TradeRecord),

    /// The pricing model moved a property's market price
    PriceUpdated {
        property_id: PropertyId,
        previous: Price,
        current: Price,
    },
}
