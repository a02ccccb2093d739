//! Propshare Pricing Models
//!
//! Implementations of market-price recomputation for the propshare
//! trading system.

mod pressure;

pub use pressure::PressureVolatilityModel;

// Re-export the trait from ports for convenience
pub use propshare_ports::PricingModel;
