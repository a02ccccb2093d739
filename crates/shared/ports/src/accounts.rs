use propshare_core::{Price, PropertyId, ShareCount, UserId};

use crate::error::StoreResult;

/// Port for user account state: cash wallets and share holdings
///
/// Every mutating method is atomic: the check and the write happen inside
/// the same entry scope, so concurrent callers can never interleave a
/// read-then-write on the same wallet or holding. Callers that need a
/// larger critical section (settlement touches two wallets, a holding,
/// a listing, and the ledger) bring their own serialization on top.
pub trait AccountStore: Send + Sync {
    /// Current wallet balance
    fn wallet_balance(&self, user: UserId) -> StoreResult<Price>;

    /// Apply a signed delta to a wallet and return the new balance
    ///
    /// Fails with `InsufficientFunds`, applying nothing, when the result
    /// would be negative.
    fn adjust_wallet(&self, user: UserId, delta: Price) -> StoreResult<Price>;

    /// Shares of `property` held by `user` (0 when no holding exists)
    fn holding(&self, user: UserId, property: &PropertyId) -> StoreResult<ShareCount>;

    /// Add shares to a holding, creating it if absent; returns the new count
    fn credit_shares(
        &self,
        user: UserId,
        property: &PropertyId,
        shares: ShareCount,
    ) -> StoreResult<ShareCount>;

    /// Remove shares from a holding; returns the remaining count
    ///
    /// Fails with `InsufficientShares`, applying nothing, when the holding
    /// is smaller than `shares`. A holding that reaches zero is removed,
    /// never stored as zero.
    fn debit_shares(
        &self,
        user: UserId,
        property: &PropertyId,
        shares: ShareCount,
    ) -> StoreResult<ShareCount>;

    /// Total shares of `property` across all holders
    ///
    /// Reconciliation view: together with the open listings this accounts
    /// for every issued share of the property.
    fn shares_held(&self, property: &PropertyId) -> ShareCount;
}
