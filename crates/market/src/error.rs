use propshare_core::{ListingId, Price, PropertyId, ShareCount, UserId};
use propshare_ports::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Listing not found: {0}")]
    ListingNotFound(ListingId),

    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    #[error("Account not found: {0}")]
    AccountNotFound(UserId),

    #[error("Invalid share quantity: {0}")]
    InvalidQuantity(String),

    #[error("Insufficient wallet balance: required {required}, available {available}")]
    InsufficientFunds { required: Price, available: Price },

    #[error("Insufficient shares: requested {requested}, held {held}")]
    InsufficientShares {
        requested: ShareCount,
        held: ShareCount,
    },

    /// An invariant the engine maintains itself was observed broken.
    /// Unreachable through the public operations; logged as a fault,
    /// never a business error.
    #[error("Internal consistency fault: {0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, MarketError>;

impl From<StoreError> for MarketError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountNotFound(user) => MarketError::AccountNotFound(user),
            StoreError::PropertyNotFound(property) => MarketError::PropertyNotFound(property),
            StoreError::InsufficientFunds {
                required,
                available,
            } => MarketError::InsufficientFunds {
                required,
                available,
            },
            StoreError::InsufficientShares { requested, held } => {
                MarketError::InsufficientShares { requested, held }
            }
        }
    }
}
