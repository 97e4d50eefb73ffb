//! End-to-end prediction pipeline: the data gate, the walk-forward fit,
//! and the summary fields.

use auspex::model::ForestConfig;
use auspex::services::analysis::{build_features, predict_direction, predict_direction_with};
use auspex::types::{Candle, Direction, SignalStrength};

fn candle(i: usize, close: f64) -> Candle {
    Candle {
        time: 1_700_000_000 + i as i64 * 3600,
        open: close - 0.2,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000.0 + (i % 7) as f64 * 50.0,
    }
}

fn wavy_series(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| candle(i, 100.0 + (i as f64 * 0.8).sin() * 5.0 + i as f64 * 0.05))
        .collect()
}

#[test]
fn short_history_yields_wait() {
    let candles: Vec<Candle> = (0..19).map(|i| candle(i, 100.0 + i as f64)).collect();
    let details = predict_direction(&candles);
    assert_eq!(details.prediction, "WAIT");
    assert_eq!(details.direction, Direction::InsufficientData);
    assert_eq!(details.confidence, 0.0);
    assert_eq!(details.message, "Not enough historical data for prediction");
    assert!(details.current_price.is_none());
}

#[test]
fn flat_history_yields_wait() {
    // Constant closes leave the oscillator undefined on every bar, so no
    // feature row survives.
    let candles: Vec<Candle> = (0..120).map(|i| candle(i, 50.0)).collect();
    assert!(build_features(&candles).is_none());

    let details = predict_direction(&candles);
    assert_eq!(details.direction, Direction::InsufficientData);
    assert_eq!(details.confidence, 0.0);
}

#[test]
fn feature_rows_exclude_the_unlabeled_last_bar() {
    let candles = wavy_series(60);
    let set = build_features(&candles).unwrap();
    // First complete row at bar 19, last labelable bar is 58.
    assert_eq!(set.len(), 40);
    assert_eq!(set.rows.len(), set.labels.len());
}

#[test]
fn monotonic_rise_predicts_up_with_full_confidence() {
    let candles: Vec<Candle> = (0..80).map(|i| candle(i, 100.0 + i as f64)).collect();
    let details = predict_direction(&candles);

    assert_eq!(details.direction, Direction::Up);
    assert_eq!(details.prediction, "UP");
    assert_eq!(details.confidence, 100.0);
    assert_eq!(details.signal_strength, Some(SignalStrength::Strong));
    assert_eq!(details.message, "STRONG UP signal with 100% confidence");
}

#[test]
fn summary_reports_last_bar_price_and_change() {
    let mut closes: Vec<f64> = (0..78).map(|i| 10.0 + i as f64).collect();
    closes.push(100.0);
    closes.push(105.0);
    let candles: Vec<Candle> = closes
        .into_iter()
        .enumerate()
        .map(|(i, c)| candle(i, c))
        .collect();

    let details = predict_direction(&candles);
    assert_eq!(details.current_price, Some(105.0));
    assert_eq!(details.price_change_pct, Some(5.0));
}

#[test]
fn prediction_is_reproducible() {
    let candles = wavy_series(150);
    let a = predict_direction(&candles);
    let b = predict_direction(&candles);
    assert_eq!(a.direction, b.direction);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.message, b.message);
}

#[test]
fn forest_size_does_not_break_determinism() {
    let candles = wavy_series(120);
    let config = ForestConfig {
        n_trees: 15,
        ..Default::default()
    };
    let a = predict_direction_with(&candles, &config);
    let b = predict_direction_with(&candles, &config);
    assert_eq!(a.direction, b.direction);
    assert_eq!(a.confidence, b.confidence);
}
