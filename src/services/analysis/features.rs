//! Feature engineering for the directional predictor.
//!
//! Builds a per-bar feature table plus a next-bar label from raw candle
//! history. Rows with any undefined feature or label are dropped, which
//! always removes the newest bar (its label needs a close that does not
//! exist yet): the surviving last row belongs to the second-most-recent
//! candle, and the forecast is therefore computed one bar behind the
//! freshest close.

use crate::services::analysis::indicators::{macd, pct_change, rolling_std, rsi, sma};
use crate::types::Candle;

/// Feature column names, in matrix order.
pub const FEATURE_NAMES: [&str; 10] = [
    "sma_5",
    "sma_10",
    "sma_20",
    "rsi",
    "macd",
    "macd_signal",
    "momentum",
    "volatility",
    "volume_sma",
    "price_position",
];

/// Minimum raw candles before any features are attempted.
pub const MIN_RAW_BARS: usize = 20;
/// Minimum surviving rows needed to train.
pub const MIN_FEATURE_ROWS: usize = 10;

/// Engineered feature rows with their binary labels.
///
/// `labels[i]` is 1 when the close after row `i`'s bar was strictly
/// higher than that bar's close.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Close position within the bar's high-low span, `None` on a zero
/// span.
fn price_position(candle: &Candle) -> Option<f64> {
    let span = candle.high - candle.low;
    if span > 0.0 {
        Some((candle.close - candle.low) / span)
    } else {
        None
    }
}

/// Build the feature table for a candle series.
///
/// Returns `None` when there are fewer than [`MIN_RAW_BARS`] candles or
/// fewer than [`MIN_FEATURE_ROWS`] rows survive the drop of incomplete
/// rows.
pub fn build_features(candles: &[Candle]) -> Option<FeatureSet> {
    let n = candles.len();
    if n < MIN_RAW_BARS {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    let sma_5 = sma(&closes, 5);
    let sma_10 = sma(&closes, 10);
    let sma_20 = sma(&closes, 20);
    let rsi_14 = rsi(&closes, 14);
    let (macd_line, macd_sig, _) = macd(&closes, 12, 26, 9);
    let momentum = pct_change(&closes, 5);
    let volatility = rolling_std(&closes, 10);
    let volume_sma = sma(&volumes, 5);

    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);

    for t in 0..n {
        // The last bar has no successor, so its label is undefined and
        // the row is dropped with it.
        let label = if t + 1 < n {
            Some(u8::from(closes[t + 1] > closes[t]))
        } else {
            None
        };

        let row = (|| {
            Some(vec![
                sma_5[t]?,
                sma_10[t]?,
                sma_20[t]?,
                rsi_14[t]?,
                macd_line[t],
                macd_sig[t],
                momentum[t]?,
                volatility[t]?,
                volume_sma[t]?,
                price_position(&candles[t])?,
            ])
        })();

        if let (Some(row), Some(label)) = (row, label) {
            rows.push(row);
            labels.push(label);
        }
    }

    if rows.len() < MIN_FEATURE_ROWS {
        return None;
    }

    Some(FeatureSet { rows, labels })
}
