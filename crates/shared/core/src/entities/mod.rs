mod account;
mod holding;
mod listing;
mod property;
mod side;
mod trade;

pub use account::{Account, AccountError};
pub use holding::Holdings;
pub use listing::SellListing;
pub use property::PropertyRecord;
pub use side::TradeSide;
pub use trade::TradeRecord;
