//! Propshare Core Domain
//!
//! Pure domain types for the propshare fractional-ownership market.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Account, AccountError, Holdings, PropertyRecord, SellListing, TradeRecord, TradeSide,
};
pub use values::{ListingId, Price, PropertyId, ShareCount, Timestamp, TradeId, UserId};
