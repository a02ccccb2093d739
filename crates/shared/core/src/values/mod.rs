use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Price value - uses Decimal for precision
/// Future: could become a newtype with validation (positive, tick size)
pub type Price = Decimal;

/// Whole-share count; fractional ownership is expressed in integral shares
pub type ShareCount = u64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Unique identifier for a user account
pub type UserId = Uuid;

/// Unique identifier for an open sell listing
pub type ListingId = Uuid;

/// Unique identifier for a ledger entry
pub type TradeId = Uuid;

/// Unique identifier for a registered property
///
/// This provides a stable reference to a catalog entry (ids like
/// `PROP00042`) that can be stored in listings and used as map keys,
/// without copying the full property record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl PropertyId {
    /// Create a new property ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PropertyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PropertyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_id() {
        let id = PropertyId::new("PROP00042");
        assert_eq!(id.as_str(), "PROP00042");
        assert_eq!(format!("{}", id), "PROP00042");
        assert_eq!(PropertyId::from("PROP00042"), id);
    }
}
