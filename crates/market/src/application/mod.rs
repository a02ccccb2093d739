mod market;

pub use market::ShareMarket;
