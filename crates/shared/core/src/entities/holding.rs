use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::account::AccountError;
use crate::values::{PropertyId, ShareCount};

/// Share holdings for one account, keyed by property
///
/// The mapping never stores a zero entry: `debit` removes a holding the
/// moment it reaches zero, so "owns zero shares" and "has no holding" are
/// the same observable state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Holdings {
    shares: HashMap<PropertyId, ShareCount>,
}

impl Holdings {
    pub fn new() -> Self {
        Self {
            shares: HashMap::new(),
        }
    }

    /// Shares owned for a property (0 when no holding exists)
    pub fn shares(&self, property: &PropertyId) -> ShareCount {
        self.shares.get(property).copied().unwrap_or(0)
    }

    /// Whether a holding exists for the property
    pub fn contains(&self, property: &PropertyId) -> bool {
        self.shares.contains_key(property)
    }

    /// Add shares to a holding, creating it if absent; returns the new count
    pub fn credit(&mut self, property: &PropertyId, shares: ShareCount) -> ShareCount {
        if shares == 0 {
            return self.shares(property);
        }
        let count = self.shares.entry(property.clone()).or_insert(0);
        *count += shares;
        *count
    }

    /// Remove shares from a holding; returns the remaining count
    ///
    /// Fails without mutating when the holding is smaller than `shares`.
    /// A holding that reaches zero is removed, never stored as zero.
    pub fn debit(
        &mut self,
        property: &PropertyId,
        shares: ShareCount,
    ) -> Result<ShareCount, AccountError> {
        let held = self.shares(property);
        if held < shares {
            return Err(AccountError::InsufficientShares);
        }
        let remaining = held - shares;
        if remaining == 0 {
            self.shares.remove(property);
        } else {
            self.shares.insert(property.clone(), remaining);
        }
        Ok(remaining)
    }

    /// Iterate over (property, shares) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyId, ShareCount)> {
        self.shares.iter().map(|(property, shares)| (property, *shares))
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }
}
