use std::env;

/// Application configuration, loaded from the environment with
/// sensible defaults for every field.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Binance API key (optional, public endpoints work without).
    pub binance_api_key: Option<String>,
    /// Upstream HTTP request timeout in seconds.
    pub http_timeout_secs: u64,
    /// TTL for cached candle series in seconds.
    pub cache_ttl_secs: u64,
    /// Number of trees in the prediction forest.
    pub forest_trees: usize,
    /// Maximum depth of each tree.
    pub forest_max_depth: usize,
    /// Base random seed for the model; fixed so repeated calls on
    /// identical input are reproducible.
    pub model_seed: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        Self {
            host,
            port,
            binance_api_key: env::var("BINANCE_API_KEY").ok(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            forest_trees: env::var("FOREST_TREES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            forest_max_depth: env::var("FOREST_MAX_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            model_seed: env::var("MODEL_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(42),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            binance_api_key: None,
            http_timeout_secs: 30,
            cache_ttl_secs: 60,
            forest_trees: 50,
            forest_max_depth: 10,
            model_seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.forest_trees, 50);
        assert_eq!(config.forest_max_depth, 10);
        assert_eq!(config.model_seed, 42);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(cloned.host, config.host);
        assert_eq!(cloned.cache_ttl_secs, config.cache_ttl_secs);
    }
}
