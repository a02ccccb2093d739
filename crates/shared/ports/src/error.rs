use propshare_core::{Price, PropertyId, ShareCount, UserId};
use thiserror::Error;

/// Domain-level errors for store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account not found: {0}")]
    AccountNotFound(UserId),

    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    #[error("Insufficient wallet balance: required {required}, available {available}")]
    InsufficientFunds { required: Price, available: Price },

    #[error("Insufficient shares: requested {requested}, held {held}")]
    InsufficientShares { requested: ShareCount, held: ShareCount },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
