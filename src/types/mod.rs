//! Shared data contracts: candles, indicator rows, prediction payloads.

pub mod analysis;
pub mod candle;
pub mod prediction;

pub use analysis::{AnalysisData, IndicatorRow, TradeSignal};
pub use candle::{Candle, Market, Timeframe};
pub use prediction::{Direction, PredictionDetails, SignalStrength};
