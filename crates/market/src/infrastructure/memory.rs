use dashmap::DashMap;
use propshare_core::{Account, Price, PropertyId, PropertyRecord, ShareCount, UserId};
use propshare_ports::{AccountStore, PropertyStore, StoreError, StoreResult};
use rust_decimal::Decimal;

/// In-memory account store
///
/// Thread-safe storage over DashMap. Each mutating call runs inside the
/// account's entry guard, which is what makes `adjust_wallet` and
/// `debit_shares` check-and-apply rather than read-then-write.
/// Suitable for simulation and testing; a persistent deployment supplies
/// its own `AccountStore`.
pub struct InMemoryAccounts {
    accounts: DashMap<UserId, Account>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Register an account with an opening balance
    pub fn open_account(&self, user: UserId, opening_balance: Price) {
        self.accounts.insert(user, Account::new(user, opening_balance));
    }

    /// Snapshot of an account
    pub fn get(&self, user: UserId) -> Option<Account> {
        self.accounts.get(&user).map(|entry| entry.clone())
    }
}

impl Default for InMemoryAccounts {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccounts {
    fn wallet_balance(&self, user: UserId) -> StoreResult<Price> {
        self.accounts
            .get(&user)
            .map(|account| account.wallet)
            .ok_or(StoreError::AccountNotFound(user))
    }

    fn adjust_wallet(&self, user: UserId, delta: Price) -> StoreResult<Price> {
        let mut account = self
            .accounts
            .get_mut(&user)
            .ok_or(StoreError::AccountNotFound(user))?;

        if delta >= Decimal::ZERO {
            account.deposit(delta);
        } else {
            let amount = -delta;
            account
                .withdraw(amount)
                .map_err(|_| StoreError::InsufficientFunds {
                    required: amount,
                    available: account.wallet,
                })?;
        }
        Ok(account.wallet)
    }

    fn holding(&self, user: UserId, property: &PropertyId) -> StoreResult<ShareCount> {
        self.accounts
            .get(&user)
            .map(|account| account.holdings.shares(property))
            .ok_or(StoreError::AccountNotFound(user))
    }

    fn credit_shares(
        &self,
        user: UserId,
        property: &PropertyId,
        shares: ShareCount,
    ) -> StoreResult<ShareCount> {
        let mut account = self
            .accounts
            .get_mut(&user)
            .ok_or(StoreError::AccountNotFound(user))?;
        Ok(account.credit_shares(property, shares))
    }

    fn debit_shares(
        &self,
        user: UserId,
        property: &PropertyId,
        shares: ShareCount,
    ) -> StoreResult<ShareCount> {
        let mut account = self
            .accounts
            .get_mut(&user)
            .ok_or(StoreError::AccountNotFound(user))?;

        let held = account.holdings.shares(property);
        account
            .debit_shares(property, shares)
            .map_err(|_| StoreError::InsufficientShares {
                requested: shares,
                held,
            })
    }

    fn shares_held(&self, property: &PropertyId) -> ShareCount {
        self.accounts
            .iter()
            .map(|entry| entry.holdings.shares(property))
            .sum()
    }
}

/// In-memory property store
///
/// Holds the trading-relevant slice of the catalog; the full catalog lives
/// with its owning service.
pub struct InMemoryProperties {
    properties: DashMap<PropertyId, PropertyRecord>,
}

impl InMemoryProperties {
    pub fn new() -> Self {
        Self {
            properties: DashMap::new(),
        }
    }

    /// Register a property record
    pub fn insert(&self, record: PropertyRecord) {
        self.properties.insert(record.property_id.clone(), record);
    }

    /// Snapshot of a record
    pub fn get(&self, property: &PropertyId) -> Option<PropertyRecord> {
        self.properties.get(property).map(|entry| entry.clone())
    }
}

impl Default for InMemoryProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore for InMemoryProperties {
    fn contains(&self, property: &PropertyId) -> bool {
        self.properties.contains_key(property)
    }

    fn current_price(&self, property: &PropertyId) -> StoreResult<Price> {
        self.properties
            .get(property)
            .map(|record| record.current_price)
            .ok_or_else(|| StoreError::PropertyNotFound(property.clone()))
    }

    fn set_current_price(&self, property: &PropertyId, price: Price) -> StoreResult<()> {
        let mut record = self
            .properties
            .get_mut(property)
            .ok_or_else(|| StoreError::PropertyNotFound(property.clone()))?;
        record.set_price(price);
        Ok(())
    }

    fn total_shares(&self, property: &PropertyId) -> StoreResult<ShareCount> {
        self.properties
            .get(property)
            .map(|record| record.total_shares)
            .ok_or_else(|| StoreError::PropertyNotFound(property.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::thread;
    use uuid::Uuid;

    #[test]
    fn test_wallet_floor() {
        let store = InMemoryAccounts::new();
        let user = Uuid::new_v4();
        store.open_account(user, dec!(100));

        let result = store.adjust_wallet(user, dec!(-250));
        assert_eq!(
            result,
            Err(StoreError::InsufficientFunds {
                required: dec!(250),
                available: dec!(100),
            })
        );
        assert_eq!(store.wallet_balance(user).unwrap(), dec!(100));

        assert_eq!(store.adjust_wallet(user, dec!(-100)).unwrap(), dec!(0));
    }

    #[test]
    fn test_unknown_account() {
        let store = InMemoryAccounts::new();
        let user = Uuid::new_v4();
        assert_eq!(
            store.wallet_balance(user),
            Err(StoreError::AccountNotFound(user))
        );
    }

    #[test]
    fn test_concurrent_debits_never_overdraw() {
        let store = Arc::new(InMemoryAccounts::new());
        let user = Uuid::new_v4();
        store.open_account(user, dec!(50));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || store.adjust_wallet(user, dec!(-10)).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(successes, 5);
        assert_eq!(store.wallet_balance(user).unwrap(), dec!(0));
    }

    #[test]
    fn test_shares_held_spans_accounts() {
        let store = InMemoryAccounts::new();
        let property = PropertyId::new("PROP00001");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.open_account(alice, dec!(0));
        store.open_account(bob, dec!(0));

        store.credit_shares(alice, &property, 600).unwrap();
        store.credit_shares(bob, &property, 400).unwrap();
        assert_eq!(store.shares_held(&property), 1000);

        store.debit_shares(bob, &property, 400).unwrap();
        assert_eq!(store.shares_held(&property), 600);
        assert_eq!(store.holding(bob, &property).unwrap(), 0);
    }

    #[test]
    fn test_property_price_roundtrip() {
        let store = InMemoryProperties::new();
        let property = PropertyId::new("PROP00001");
        store.insert(PropertyRecord::new(
            property.clone(),
            "Harbourview Apartments",
            1000,
            dec!(50),
        ));

        assert!(store.contains(&property));
        assert_eq!(store.current_price(&property).unwrap(), dec!(50));
        assert_eq!(store.total_shares(&property).unwrap(), 1000);

        store.set_current_price(&property, dec!(52.5)).unwrap();
        assert_eq!(store.current_price(&property).unwrap(), dec!(52.5));

        let missing = PropertyId::new("PROP00404");
        assert_eq!(
            store.current_price(&missing),
            Err(StoreError::PropertyNotFound(missing.clone()))
        );
    }
}
