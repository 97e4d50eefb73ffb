//! Core services: candle acquisition and the numeric analysis pipeline.

pub mod analysis;
pub mod cache;
pub mod market_data;
pub mod mock_data;

pub use cache::Cache;
pub use market_data::MarketDataService;
