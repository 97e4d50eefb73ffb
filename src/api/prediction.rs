//! Directional forecast endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::analysis::{ApiResponse, InstrumentQuery};
use crate::error::{AppError, Result};
use crate::model::ForestConfig;
use crate::services::analysis::predict_direction_with;
use crate::types::PredictionDetails;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub symbol: String,
    pub timeframe: String,
    #[serde(flatten)]
    pub details: PredictionDetails,
}

/// GET /api/prediction — train on the candle history and forecast the
/// next movement.
async fn get_prediction(
    State(state): State<AppState>,
    Query(query): Query<InstrumentQuery>,
) -> Result<Json<ApiResponse<PredictionResponse>>> {
    let params = query.resolve()?;
    let candles = state
        .market_data
        .fetch_candles(params.market, &params.symbol, params.timeframe, params.limit)
        .await;

    let config = ForestConfig {
        n_trees: state.config.forest_trees,
        max_depth: state.config.forest_max_depth,
        seed: state.config.model_seed,
        ..Default::default()
    };

    // The fit is CPU-bound; keep it off the async workers.
    let details = tokio::task::spawn_blocking(move || predict_direction_with(&candles, &config))
        .await
        .map_err(|e| AppError::Internal(format!("prediction task failed: {e}")))?;

    Ok(Json(ApiResponse::new(PredictionResponse {
        symbol: params.symbol,
        timeframe: params.timeframe.as_str().to_string(),
        details,
    })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_prediction))
}
