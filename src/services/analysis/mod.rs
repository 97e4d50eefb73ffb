//! Numeric analysis pipeline.
//!
//! Two independent branches over the same candle series: the indicator
//! engine annotates every bar for display, and the feature builder +
//! predictor produce a short-horizon directional forecast. Both are
//! pure, synchronous functions of their input; all model state lives
//! and dies inside a single call.

pub mod features;
pub mod indicators;
pub mod predictor;

pub use features::{build_features, FeatureSet, FEATURE_NAMES};
pub use indicators::compute_indicators;
pub use predictor::{predict_direction, predict_direction_with, train_and_predict};
