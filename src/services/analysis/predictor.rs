//! Directional predictor: walk-forward train/predict over engineered
//! features, summarized into a user-facing verdict.

use crate::model::{ForestConfig, RandomForest, StandardScaler};
use crate::services::analysis::features::{build_features, MIN_FEATURE_ROWS};
use crate::types::{Candle, Direction, PredictionDetails, SignalStrength};
use tracing::debug;

/// Fraction of surviving feature rows used for training.
const TRAIN_FRACTION: f64 = 0.8;

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Train a fresh model on the feature history and predict the next
/// movement for the most recent surviving row.
///
/// The split is chronological: the earliest 80% of rows train the
/// model, and only the single latest row is scored. The scaler is
/// fitted on training statistics alone. Returns the direction and a
/// 0-100 confidence, or `InsufficientData` with confidence 0 when
/// fewer than 10 feature rows survive.
pub fn train_and_predict(candles: &[Candle], config: &ForestConfig) -> (Direction, f64) {
    let Some(set) = build_features(candles) else {
        return (Direction::InsufficientData, 0.0);
    };

    let m = set.len();
    debug_assert!(m >= MIN_FEATURE_ROWS);
    let train_size = (m as f64 * TRAIN_FRACTION) as usize;

    let x_train = &set.rows[..train_size];
    let y_train = &set.labels[..train_size];
    // The most recent surviving row; its own label is never consulted.
    let latest = &set.rows[m - 1];

    let scaler = StandardScaler::fit(x_train);
    let x_train_scaled = scaler.transform(x_train);
    let latest_scaled = scaler.transform_row(latest);

    let mut forest = RandomForest::new(config.clone());
    forest.fit(&x_train_scaled, y_train);

    let (class, probability) = forest.predict_one(&latest_scaled);
    let direction = if class == 1 {
        Direction::Up
    } else {
        Direction::Down
    };
    let confidence = round_to(probability * 100.0, 2);

    debug!(
        rows = m,
        train_size,
        direction = direction.as_str(),
        confidence,
        "directional prediction complete"
    );

    (direction, confidence)
}

/// Full forecast payload: direction, confidence bucket, and price
/// context from the raw candle series.
///
/// `price_change_pct` always uses the true last two candles even though
/// the forecast itself was computed one bar behind (the feature builder
/// drops the newest bar with its undefined label).
pub fn predict_direction_with(candles: &[Candle], config: &ForestConfig) -> PredictionDetails {
    let (direction, confidence) = train_and_predict(candles, config);

    if direction == Direction::InsufficientData {
        return PredictionDetails::insufficient_data();
    }
    let Some(latest) = candles.last() else {
        return PredictionDetails::insufficient_data();
    };
    let price_change_pct = if candles.len() > 1 {
        let prev = &candles[candles.len() - 2];
        (latest.close - prev.close) / prev.close * 100.0
    } else {
        0.0
    };

    let strength = SignalStrength::from_confidence(confidence);

    PredictionDetails {
        prediction: direction.as_str().to_string(),
        confidence,
        direction,
        signal_strength: Some(strength),
        current_price: Some(round_to(latest.close, 5)),
        price_change_pct: Some(round_to(price_change_pct, 2)),
        message: format!(
            "{} {} signal with {}% confidence",
            strength.as_str(),
            direction.as_str(),
            confidence
        ),
    }
}

/// [`predict_direction_with`] using the default forest settings.
pub fn predict_direction(candles: &[Candle]) -> PredictionDetails {
    predict_direction_with(candles, &ForestConfig::default())
}
