pub mod client;
pub mod stats;
pub mod traits;
pub mod types;
pub mod yahoo;

pub use client::MarketDataClient;
pub use traits::MarketDataProvider;
pub use yahoo::YahooProvider;

#[cfg(test)]
mod stats_tests;
#[cfg(test)]
mod yahoo_tests;
