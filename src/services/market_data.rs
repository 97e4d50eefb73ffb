//! Candle acquisition from upstream providers.
//!
//! Crypto history comes from the Binance klines endpoint, forex and
//! stock history from the Yahoo Finance chart endpoint. Acquisition
//! never fails from the pipeline's point of view: any upstream error
//! falls back to the deterministic synthetic generator, so callers
//! always receive a well-formed, chronologically sorted series.

use crate::config::Config;
use crate::services::cache::Cache;
use crate::services::mock_data;
use crate::types::{Candle, Market, Timeframe};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";
const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// One Binance kline: [open_time_ms, open, high, low, close, volume,
/// close_time_ms, quote_volume, trades, taker_base, taker_quote, _].
type BinanceKline = (
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    String,
    u64,
    String,
    String,
    String,
);

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Map a display symbol to a Binance trading pair: "BTC/USDT" ->
/// "BTCUSDT", bare "BTC" -> "BTCUSDT".
fn binance_pair(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    if upper.contains('/') {
        upper.replace('/', "")
    } else if upper.ends_with("USDT") {
        upper
    } else {
        format!("{upper}USDT")
    }
}

/// Map a display symbol to Yahoo's form. Forex pairs become "EURUSD=X";
/// stock share classes use hyphens (BRK.B -> BRK-B).
fn yahoo_symbol(market: Market, symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    match market {
        Market::Forex => {
            if upper.ends_with("=X") {
                upper
            } else {
                format!("{}=X", upper.replace('/', ""))
            }
        }
        _ => upper.replace('.', "-"),
    }
}

/// Enforce the bar-sequence contract on provider output: ascending
/// unique timestamps and positive prices.
fn sanitize(mut candles: Vec<Candle>) -> Vec<Candle> {
    candles.retain(|c| c.open > 0.0 && c.high > 0.0 && c.low > 0.0 && c.close > 0.0);
    candles.sort_by_key(|c| c.time);
    candles.dedup_by_key(|c| c.time);
    candles
}

/// Market data service with a shared TTL cache.
pub struct MarketDataService {
    client: Client,
    cache: Cache<Vec<Candle>>,
    binance_api_key: Option<String>,
}

impl MarketDataService {
    pub fn new(config: &Config) -> Arc<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Arc::new(Self {
            client,
            cache: Cache::new(Duration::from_secs(config.cache_ttl_secs)),
            binance_api_key: config.binance_api_key.clone(),
        })
    }

    /// Fetch up to `limit` candles for an instrument.
    ///
    /// Never fails: upstream errors and malformed or empty payloads
    /// fall back to the synthetic generator.
    pub async fn fetch_candles(
        &self,
        market: Market,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Vec<Candle> {
        let cache_key = format!("{}:{}:{}", market.as_str(), symbol, timeframe.as_str());
        if let Some(cached) = self.cache.get(&cache_key) {
            if cached.len() >= limit {
                debug!(key = %cache_key, "serving candles from cache");
                return cached[cached.len() - limit..].to_vec();
            }
        }

        let fetched = match market {
            Market::Crypto => self.fetch_binance(symbol, timeframe, limit).await,
            Market::Forex | Market::Stock => self.fetch_yahoo(market, symbol, timeframe).await,
        };

        match fetched {
            Ok(candles) => {
                let candles = sanitize(candles);
                if candles.is_empty() {
                    warn!(symbol, "upstream returned no usable candles, using synthetic data");
                    return mock_data::generate_candles(market, symbol, timeframe, limit);
                }
                info!(symbol, count = candles.len(), "fetched candle history");
                self.cache.set(cache_key, candles.clone());
                let start = candles.len().saturating_sub(limit);
                candles[start..].to_vec()
            }
            Err(e) => {
                warn!(symbol, error = %e, "candle fetch failed, using synthetic data");
                mock_data::generate_candles(market, symbol, timeframe, limit)
            }
        }
    }

    async fn fetch_binance(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> anyhow::Result<Vec<Candle>> {
        let pair = binance_pair(symbol);
        let url = format!(
            "{}/klines?symbol={}&interval={}&limit={}",
            BINANCE_API_URL,
            pair,
            timeframe.binance_interval(),
            limit.clamp(1, 1000)
        );
        debug!(%url, "fetching Binance klines");

        let mut request = self.client.get(&url);
        if let Some(ref key) = self.binance_api_key {
            request = request.header("X-MBX-APIKEY", key);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Binance API error: {}", response.status());
        }

        let klines: Vec<BinanceKline> = response.json().await?;
        let candles = klines
            .into_iter()
            .map(|k| {
                Ok(Candle {
                    time: k.0 / 1000,
                    open: k.1.parse()?,
                    high: k.2.parse()?,
                    low: k.3.parse()?,
                    close: k.4.parse()?,
                    volume: k.5.parse()?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(candles)
    }

    async fn fetch_yahoo(
        &self,
        market: Market,
        symbol: &str,
        timeframe: Timeframe,
    ) -> anyhow::Result<Vec<Candle>> {
        let yahoo = yahoo_symbol(market, symbol);
        let url = format!(
            "{}/{}?range={}&interval={}&includePrePost=false",
            YAHOO_API_URL,
            yahoo,
            timeframe.yahoo_range(),
            timeframe.yahoo_interval()
        );
        debug!(%url, "fetching Yahoo chart data");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Yahoo API error: {}", response.status());
        }

        let data: YahooChartResponse = response.json().await?;
        if let Some(error) = data.chart.error {
            anyhow::bail!("Yahoo API error: {} - {}", error.code, error.description);
        }

        let result = data
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| anyhow::anyhow!("Yahoo response has no result"))?;

        let timestamps = result
            .timestamp
            .ok_or_else(|| anyhow::anyhow!("Yahoo response has no timestamps"))?;
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Yahoo response has no quote data"))?;

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        // Yahoo pads gaps with nulls; keep only fully populated bars.
        let candles = timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, &time)| {
                Some(Candle {
                    time,
                    open: (*opens.get(i)?)?,
                    high: (*highs.get(i)?)?,
                    low: (*lows.get(i)?)?,
                    close: (*closes.get(i)?)?,
                    volume: (*volumes.get(i)?)? as f64,
                })
            })
            .collect();
        Ok(candles)
    }
}
