use std::collections::BTreeSet;

use dashmap::DashMap;
use propshare_core::{ListingId, Price, PropertyId, SellListing, ShareCount, Timestamp};

use crate::error::{MarketError, Result};

/// Sort key giving price-time priority: cheapest first, oldest first at
/// equal price, listing id as the final tiebreak.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct BookKey {
    price_per_share: Price,
    created_at: Timestamp,
    id: ListingId,
}

impl BookKey {
    fn of(listing: &SellListing) -> Self {
        Self {
            price_per_share: listing.price_per_share,
            created_at: listing.created_at,
            id: listing.id,
        }
    }
}

/// Open sell listings, indexed by id and by property in price-time order
///
/// Reads are lock-free and may run at any time. Mutations touching one
/// property are serialized by the caller's per-property critical section;
/// the book itself never leaves its two indexes out of sync. The key never
/// changes over a listing's lifetime (partial fills only touch `shares`),
/// so only insertion and removal maintain the index.
pub struct OrderBook {
    /// Listings by id
    listings: DashMap<ListingId, SellListing>,
    /// Index: property -> listing keys in priority order
    by_property: DashMap<PropertyId, BTreeSet<BookKey>>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            listings: DashMap::new(),
            by_property: DashMap::new(),
        }
    }

    /// Add a listing to the book
    pub fn insert(&self, listing: SellListing) {
        self.by_property
            .entry(listing.property_id.clone())
            .or_default()
            .insert(BookKey::of(&listing));
        self.listings.insert(listing.id, listing);
    }

    /// Look up a listing by id
    pub fn get(&self, id: ListingId) -> Option<SellListing> {
        self.listings.get(&id).map(|entry| entry.clone())
    }

    /// Open listings for a property, cheapest and oldest first
    pub fn listings_for(&self, property: &PropertyId) -> Vec<SellListing> {
        // Snapshot the keys before touching the listing map; holding guards
        // on both maps at once could deadlock against a removal
        let keys = self.property_keys(property);
        keys.iter()
            .filter_map(|key| self.listings.get(&key.id).map(|entry| entry.clone()))
            .collect()
    }

    /// Decrement a listing by `filled` shares, deleting it at zero
    ///
    /// Returns the updated listing, or `None` when the fill exhausted it.
    /// Never partially applies: the listing is untouched on error.
    pub fn reduce_or_remove(
        &self,
        id: ListingId,
        filled: ShareCount,
    ) -> Result<Option<SellListing>> {
        let Some(mut entry) = self.listings.get_mut(&id) else {
            return Err(MarketError::ListingNotFound(id));
        };
        if filled == 0 || filled > entry.shares {
            return Err(MarketError::InvalidQuantity(format!(
                "fill of {} against {} remaining shares",
                filled, entry.shares
            )));
        }

        entry.shares -= filled;
        if entry.shares > 0 {
            return Ok(Some(entry.clone()));
        }

        let exhausted = entry.clone();
        drop(entry);
        self.listings.remove(&id);
        if let Some(mut index) = self.by_property.get_mut(&exhausted.property_id) {
            index.remove(&BookKey::of(&exhausted));
        }
        Ok(None)
    }

    /// Total open shares listed for a property
    pub fn open_shares(&self, property: &PropertyId) -> ShareCount {
        let keys = self.property_keys(property);
        keys.iter()
            .filter_map(|key| self.listings.get(&key.id).map(|entry| entry.shares))
            .sum()
    }

    fn property_keys(&self, property: &PropertyId) -> Vec<BookKey> {
        self.by_property
            .get(property)
            .map(|index| index.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of open listings across all properties
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn listing_at(shares: ShareCount, price: Price, offset_secs: i64) -> SellListing {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        SellListing::new_with_time(
            "PROP00001",
            Uuid::new_v4(),
            shares,
            price,
            base + Duration::seconds(offset_secs),
        )
    }

    #[test]
    fn test_price_time_priority() {
        let book = OrderBook::new();
        let expensive = listing_at(10, dec!(60), 0);
        let cheap_late = listing_at(10, dec!(50), 30);
        let cheap_early = listing_at(10, dec!(50), 10);

        book.insert(expensive.clone());
        book.insert(cheap_late.clone());
        book.insert(cheap_early.clone());

        let ordered = book.listings_for(&PropertyId::new("PROP00001"));
        let ids: Vec<_> = ordered.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![cheap_early.id, cheap_late.id, expensive.id]);
    }

    #[test]
    fn test_partial_fill_keeps_listing() {
        let book = OrderBook::new();
        let listing = listing_at(100, dec!(50), 0);
        let id = listing.id;
        book.insert(listing);

        let reduced = book.reduce_or_remove(id, 40).unwrap();
        assert_eq!(reduced.unwrap().shares, 60);
        assert_eq!(book.get(id).unwrap().shares, 60);
        assert_eq!(book.open_shares(&PropertyId::new("PROP00001")), 60);
    }

    #[test]
    fn test_exact_fill_removes_listing() {
        let book = OrderBook::new();
        let listing = listing_at(100, dec!(50), 0);
        let id = listing.id;
        book.insert(listing);

        let removed = book.reduce_or_remove(id, 100).unwrap();
        assert!(removed.is_none());
        assert!(book.get(id).is_none());
        assert!(book.listings_for(&PropertyId::new("PROP00001")).is_empty());
        assert!(book.is_empty());
    }

    #[test]
    fn test_overfill_is_rejected_without_mutation() {
        let book = OrderBook::new();
        let listing = listing_at(60, dec!(50), 0);
        let id = listing.id;
        book.insert(listing);

        let result = book.reduce_or_remove(id, 61);
        assert!(matches!(result, Err(MarketError::InvalidQuantity(_))));
        assert_eq!(book.get(id).unwrap().shares, 60);

        let result = book.reduce_or_remove(id, 0);
        assert!(matches!(result, Err(MarketError::InvalidQuantity(_))));
    }

    #[test]
    fn test_unknown_listing() {
        let book = OrderBook::new();
        let result = book.reduce_or_remove(Uuid::new_v4(), 1);
        assert!(matches!(result, Err(MarketError::ListingNotFound(_))));
    }
}
