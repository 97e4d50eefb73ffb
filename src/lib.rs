//! auspex - market analysis server.
//!
//! Fetches OHLCV candle history, annotates it with technical indicators
//! and an SMA-crossover trading signal, and produces a short-horizon
//! directional forecast from a random forest fitted fresh on every
//! request.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod types;

use config::Config;
use services::MarketDataService;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub market_data: Arc<MarketDataService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let market_data = MarketDataService::new(&config);
        Self {
            config: Arc::new(config),
            market_data,
        }
    }
}
