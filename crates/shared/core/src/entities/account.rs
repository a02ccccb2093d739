use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Holdings;
use crate::values::{Price, PropertyId, ShareCount, Timestamp, UserId};

/// A user account holding a cash wallet and per-property share holdings
///
/// The wallet is never negative: `withdraw` fails without mutating when
/// the balance is short, and no other mutator decreases it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Authenticated user identity this account belongs to
    pub id: UserId,

    /// Cash balance
    pub wallet: Price,

    /// Shares owned, keyed by property
    pub holdings: Holdings,

    /// When the account was created
    pub created_at: Timestamp,

    /// Last update time
    pub updated_at: Timestamp,
}

impl Account {
    /// Create a new account with an explicit creation time
    pub fn new_with_time(id: UserId, opening_balance: Price, now: Timestamp) -> Self {
        Self {
            id,
            wallet: opening_balance,
            holdings: Holdings::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account using current system time
    pub fn new(id: UserId, opening_balance: Price) -> Self {
        Self::new_with_time(id, opening_balance, Utc::now())
    }

    /// Deposit funds into the wallet
    pub fn deposit(&mut self, amount: Price) {
        self.wallet += amount;
        self.updated_at = Utc::now();
    }

    /// Withdraw funds from the wallet
    pub fn withdraw(&mut self, amount: Price) -> Result<(), AccountError> {
        if amount > self.wallet {
            return Err(AccountError::InsufficientFunds);
        }
        self.wallet -= amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Add shares to the holding for a property; returns the new count
    pub fn credit_shares(&mut self, property: &PropertyId, shares: ShareCount) -> ShareCount {
        let count = self.holdings.credit(property, shares);
        self.updated_at = Utc::now();
        count
    }

    /// Remove shares from the holding for a property; returns the remaining count
    ///
    /// Fails without mutating when the holding is smaller than `shares`.
    pub fn debit_shares(
        &mut self,
        property: &PropertyId,
        shares: ShareCount,
    ) -> Result<ShareCount, AccountError> {
        let remaining = self.holdings.debit(property, shares)?;
        self.updated_at = Utc::now();
        Ok(remaining)
    }
}

/// Account operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    InsufficientFunds,
    InsufficientShares,
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientFunds => write!(f, "Insufficient wallet balance"),
            Self::InsufficientShares => write!(f, "Insufficient shares held"),
        }
    }
}

impl std::error::Error for AccountError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn create_test_account() -> Account {
        Account::new(Uuid::new_v4(), dec!(100000))
    }

    #[test]
    fn test_account_creation() {
        let account = create_test_account();

        assert_eq!(account.wallet, dec!(100000));
        assert!(account.holdings.is_empty());
    }

    #[test]
    fn test_deposit_withdraw() {
        let mut account = create_test_account();

        account.deposit(dec!(5000));
        assert_eq!(account.wallet, dec!(105000));

        account.withdraw(dec!(3000)).unwrap();
        assert_eq!(account.wallet, dec!(102000));

        // Try to withdraw more than available
        let result = account.withdraw(dec!(200000));
        assert_eq!(result, Err(AccountError::InsufficientFunds));
        assert_eq!(account.wallet, dec!(102000));
    }

    #[test]
    fn test_share_credit_debit() {
        let mut account = create_test_account();
        let property = PropertyId::new("PROP00001");

        assert_eq!(account.credit_shares(&property, 1000), 1000);
        assert_eq!(account.debit_shares(&property, 100).unwrap(), 900);
        assert_eq!(account.holdings.shares(&property), 900);

        let result = account.debit_shares(&property, 901);
        assert_eq!(result, Err(AccountError::InsufficientShares));
        assert_eq!(account.holdings.shares(&property), 900);
    }
}
