//! Indicator analysis endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::services::analysis::compute_indicators;
use crate::types::{AnalysisData, Market, Timeframe};
use crate::AppState;

/// API response wrapper.
#[derive(Debug, serde::Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, serde::Serialize)]
pub struct ApiMeta {
    pub cached: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta { cached: false },
        }
    }
}

/// Common query parameters for the analysis endpoints.
#[derive(Debug, Deserialize)]
pub struct InstrumentQuery {
    /// Instrument symbol, e.g. "BTC/USDT" or "EUR/USD".
    pub symbol: Option<String>,
    /// Market: crypto, forex, or stock.
    pub market: Option<String>,
    /// Candle timeframe: 15m, 1h, 4h, 1d.
    pub timeframe: Option<String>,
    /// Number of candles to analyze.
    pub limit: Option<usize>,
}

pub struct InstrumentParams {
    pub symbol: String,
    pub market: Market,
    pub timeframe: Timeframe,
    pub limit: usize,
}

impl InstrumentQuery {
    /// Resolve query parameters, rejecting unknown enum values.
    pub fn resolve(self) -> Result<InstrumentParams> {
        let market = match self.market.as_deref() {
            None => Market::default(),
            Some(s) => Market::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown market: {s}")))?,
        };
        let timeframe = match self.timeframe.as_deref() {
            None => Timeframe::default(),
            Some(s) => Timeframe::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown timeframe: {s}")))?,
        };
        let symbol = self.symbol.unwrap_or_else(|| match market {
            Market::Forex => "EUR/USD".to_string(),
            Market::Stock => "AAPL".to_string(),
            Market::Crypto => "BTC/USDT".to_string(),
        });
        Ok(InstrumentParams {
            symbol,
            market,
            timeframe,
            limit: self.limit.unwrap_or(100).clamp(1, 1000),
        })
    }
}

/// GET /api/analysis — candles annotated with indicators and signals.
async fn get_analysis(
    State(state): State<AppState>,
    Query(query): Query<InstrumentQuery>,
) -> Result<Json<ApiResponse<AnalysisData>>> {
    let params = query.resolve()?;
    let candles = state
        .market_data
        .fetch_candles(params.market, &params.symbol, params.timeframe, params.limit)
        .await;

    let rows = compute_indicators(&candles);
    let latest_signal = rows.last().map(|r| r.signal).unwrap_or_default();

    Ok(Json(ApiResponse::new(AnalysisData {
        symbol: params.symbol,
        timeframe: params.timeframe.as_str().to_string(),
        data: rows,
        latest_signal,
    })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_analysis))
}
