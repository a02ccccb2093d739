use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, error, info, warn};
use propshare_clock::SystemClock;
use propshare_core::{
    ListingId, Price, PropertyId, SellListing, ShareCount, TradeRecord, TradeSide, UserId,
};
use propshare_ports::{AccountStore, Clock, PricingModel, PropertyStore};
use propshare_pricing::PressureVolatilityModel;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tokio::sync::mpsc::Sender;

use crate::error::{MarketError, Result};
use crate::infrastructure::{OrderBook, TradeLedger};
use crate::model::MarketEvent;

/// Number of recent ledger entries fed to the pricing model
const PRICING_WINDOW: usize = 20;

/// Main market facade coordinating listings, settlement, and pricing
///
/// All state is shared behind `Arc`, so clones are cheap and a clone can
/// be handed to a spawned task.
///
/// Shares are reserved at listing time: creating a listing moves them out
/// of the seller's holding, so settlement never touches the seller's
/// holding at all. Only the buyer's holding, both wallets, the listing,
/// and the ledger change.
#[derive(Clone)]
pub struct ShareMarket {
    /// User wallets and holdings
    accounts: Arc<dyn AccountStore>,

    /// Trading-relevant slice of the property catalog
    properties: Arc<dyn PropertyStore>,

    /// Open sell listings
    book: Arc<OrderBook>,

    /// Append-only trade history
    ledger: Arc<TradeLedger>,

    /// Market price recomputation
    pricing: Arc<dyn PricingModel>,

    /// Time source for listing and trade timestamps
    clock: Arc<dyn Clock>,

    /// Per-property critical sections: reservation and settlement for one
    /// property never interleave
    locks: Arc<DashMap<PropertyId, Arc<Mutex<()>>>>,

    /// Channel to embedding layers (for notifications)
    events: Option<Sender<MarketEvent>>,
}

impl ShareMarket {
    /// Create a market with the standard pricing model and system clock
    pub fn new(accounts: Arc<dyn AccountStore>, properties: Arc<dyn PropertyStore>) -> Self {
        Self::with_components(
            accounts,
            properties,
            Arc::new(PressureVolatilityModel::new()),
            Arc::new(SystemClock::new()),
        )
    }

    /// Create a market with explicit pricing model and clock
    pub fn with_components(
        accounts: Arc<dyn AccountStore>,
        properties: Arc<dyn PropertyStore>,
        pricing: Arc<dyn PricingModel>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            properties,
            book: Arc::new(OrderBook::new()),
            ledger: Arc::new(TradeLedger::new()),
            pricing,
            clock,
            locks: Arc::new(DashMap::new()),
            events: None,
        }
    }

    /// Attach an event channel for notifications
    pub fn with_event_channel(mut self, events: Sender<MarketEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The order book (read access)
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// The trade ledger (read access for history views)
    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// List shares for sale, reserving them out of the seller's holding
    ///
    /// The reservation happens at creation time: the listed shares leave
    /// the seller's holding before the listing becomes visible, so they
    /// cannot be listed twice or spent while the listing is open.
    pub async fn create_listing(
        &self,
        seller_id: UserId,
        property_id: PropertyId,
        shares: ShareCount,
        price_per_share: Price,
    ) -> Result<SellListing> {
        if shares == 0 {
            return Err(MarketError::InvalidQuantity(
                "cannot list zero shares".to_string(),
            ));
        }
        if price_per_share <= Decimal::ZERO {
            return Err(MarketError::InvalidQuantity(format!(
                "price per share must be positive, got {}",
                price_per_share
            )));
        }
        if !self.properties.contains(&property_id) {
            return Err(MarketError::PropertyNotFound(property_id));
        }

        let lock = self.property_lock(&property_id);
        let listing = {
            let _guard = lock.lock().await;

            // Reservation is the only fallible step and applies nothing on
            // failure
            self.accounts
                .debit_shares(seller_id, &property_id, shares)?;

            let listing = SellListing::new_with_time(
                property_id.clone(),
                seller_id,
                shares,
                price_per_share,
                self.clock.now(),
            );
            self.book.insert(listing.clone());
            listing
        };

        info!(
            "Listing created: id={}, property={}, seller={}, shares={}, price={}",
            listing.id, listing.property_id, listing.seller_id, listing.shares,
            listing.price_per_share
        );

        self.notify(MarketEvent::ListingCreated(listing.clone()));
        self.spawn_price_refresh(property_id, shares);

        Ok(listing)
    }

    /// Open listings for a property, cheapest and oldest first
    pub fn listings(&self, property_id: &PropertyId) -> Vec<SellListing> {
        self.book.listings_for(property_id)
    }

    /// Buy shares from a single listing
    ///
    /// Validation and every mutation run inside the property's critical
    /// section. The buyer's wallet debit is the last fallible step, so a
    /// failure anywhere leaves state exactly as if the call never started.
    pub async fn execute_buy(
        &self,
        buyer_id: UserId,
        listing_id: ListingId,
        shares: ShareCount,
    ) -> Result<TradeRecord> {
        // Resolve the property outside the lock; the listing is re-read
        // inside, since it may fill or vanish while we wait
        let property_id = self
            .book
            .get(listing_id)
            .ok_or(MarketError::ListingNotFound(listing_id))?
            .property_id;

        let lock = self.property_lock(&property_id);
        let record = {
            let _guard = lock.lock().await;

            let listing = self
                .book
                .get(listing_id)
                .ok_or(MarketError::ListingNotFound(listing_id))?;
            if shares == 0 || shares > listing.shares {
                return Err(MarketError::InvalidQuantity(format!(
                    "requested {} of {} remaining shares",
                    shares, listing.shares
                )));
            }
            let cost = listing.cost_of(shares);

            // The seller account must exist before any money moves
            self.accounts.wallet_balance(listing.seller_id)?;

            // Buyer debit: atomic at the store, and the last step that can
            // legitimately fail
            self.accounts.adjust_wallet(buyer_id, -cost)?;

            // The effects below cannot fail given the validations above and
            // the held lock; an error would mean the reservation invariant
            // itself is broken
            self.accounts
                .adjust_wallet(listing.seller_id, cost)
                .map_err(|err| self.fault(format!("seller credit failed: {}", err)))?;
            self.accounts
                .credit_shares(buyer_id, &property_id, shares)
                .map_err(|err| self.fault(format!("buyer share credit failed: {}", err)))?;
            self.book
                .reduce_or_remove(listing_id, shares)
                .map_err(|err| self.fault(format!("listing reduction failed: {}", err)))?;

            let record = TradeRecord::new_with_time(
                buyer_id,
                property_id.clone(),
                TradeSide::Buy,
                shares,
                listing.price_per_share,
                self.clock.now(),
            );
            self.ledger.append(record.clone());
            record
        };

        info!(
            "Trade executed: id={}, property={}, buyer={}, shares={}, price={}, cost={}",
            record.id,
            record.property_id,
            record.user_id,
            record.shares,
            record.price,
            record.notional()
        );

        self.notify(MarketEvent::TradeExecuted(record.clone()));
        self.spawn_price_refresh(property_id, 0);

        Ok(record)
    }

    /// Recompute a property's market price from its recent trades
    ///
    /// Callable directly for reconciliation; listings and trades trigger
    /// it on their own after committing. Returns the new price, or
    /// `Ok(None)` when the window gives the model nothing to work with.
    pub fn recompute_price(&self, property_id: &PropertyId) -> Result<Option<Price>> {
        self.refresh_price(property_id, 0)
    }

    /// Shared refresh path; `pending_supply` carries a just-created
    /// listing's shares, which have no ledger entry yet but already add
    /// sell pressure.
    fn refresh_price(
        &self,
        property_id: &PropertyId,
        pending_supply: ShareCount,
    ) -> Result<Option<Price>> {
        let window = self.ledger.recent_for(property_id, PRICING_WINDOW);
        let Some(current) = self.pricing.recompute(&window, pending_supply) else {
            debug!(
                "Price update skipped for {}: {} entries in window",
                property_id,
                window.len()
            );
            return Ok(None);
        };

        let previous = self.properties.current_price(property_id)?;
        self.properties.set_current_price(property_id, current)?;

        info!(
            "Price updated for {}: {} -> {} ({})",
            property_id,
            previous,
            current,
            self.pricing.name()
        );
        self.notify(MarketEvent::PriceUpdated {
            property_id: property_id.clone(),
            previous,
            current,
        });
        Ok(Some(current))
    }

    /// Fire-and-forget refresh after a commit; failure is logged and
    /// swallowed, so a committed trade or listing stands regardless
    fn spawn_price_refresh(&self, property_id: PropertyId, pending_supply: ShareCount) {
        let market = self.clone();
        tokio::spawn(async move {
            if let Err(err) = market.refresh_price(&property_id, pending_supply) {
                warn!("Price update failed for {}: {}", property_id, err);
            }
        });
    }

    fn property_lock(&self, property_id: &PropertyId) -> Arc<Mutex<()>> {
        self.locks
            .entry(property_id.clone())
            .or_default()
            .value()
            .clone()
    }

    fn fault(&self, message: String) -> MarketError {
        error!("Internal consistency fault: {}", message);
        MarketError::Conflict(message)
    }

    fn notify(&self, event: MarketEvent) {
        if let Some(tx) = &self.events {
            if let Err(err) = tx.try_send(event) {
                warn!("Failed to forward market event: {}", err);
            }
        }
    }
}
