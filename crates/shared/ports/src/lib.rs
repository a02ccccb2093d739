//! Propshare Ports
//!
//! Port definitions (traits) for the propshare trading system.
//! These define the boundaries between domain logic and infrastructure.

mod accounts;
mod clock;
mod error;
mod pricing;
mod properties;

pub use accounts::AccountStore;
pub use clock::Clock;
pub use error::{StoreError, StoreResult};
pub use pricing::PricingModel;
pub use properties::PropertyStore;
