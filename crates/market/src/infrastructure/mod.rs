mod ledger;
mod memory;
mod order_book;

pub use ledger::TradeLedger;
pub use memory::{InMemoryAccounts, InMemoryProperties};
pub use order_book::OrderBook;
