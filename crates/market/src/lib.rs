// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::ShareMarket;
pub use error::MarketError;
pub use infrastructure::{InMemoryAccounts, InMemoryProperties, OrderBook, TradeLedger};
pub use model::MarketEvent;
