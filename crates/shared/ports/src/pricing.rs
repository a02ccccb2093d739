use propshare_core::{Price, ShareCount, TradeRecord};

/// Port for market-price recomputation models
///
/// Implementations are pure: the same window and pending supply always
/// produce the same output, and nothing is persisted here. Writing the
/// result back to the property record is the caller's job.
pub trait PricingModel: Send + Sync {
    /// Recompute a property's market price from recent ledger entries
    ///
    /// `window` holds the most recent entries, newest first. `pending_supply`
    /// carries listed-but-untraded volume: a listing created just now has no
    /// ledger entry yet but already adds sell pressure.
    ///
    /// Returns `None` when the window gives no stable estimate and the
    /// current price should be left alone.
    fn recompute(&self, window: &[TradeRecord], pending_supply: ShareCount) -> Option<Price>;

    /// Get the name of the model
    fn name(&self) -> &str;
}
