use serde::{Deserialize, Serialize};

/// Discrete trading signal derived from the SMA 20/50 crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSignal {
    Buy,
    Sell,
    Hold,
}

impl Default for TradeSignal {
    fn default() -> Self {
        TradeSignal::Hold
    }
}

/// One candle annotated with its computed indicators.
///
/// Fields whose trailing window has not filled yet are `None` and
/// serialize as JSON `null`; a leading stretch of nulls is expected
/// output, not an error. `stop_loss`/`take_profit` are present iff
/// `signal` is not HOLD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_20: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub atr: Option<f64>,
    pub signal: TradeSignal,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

/// Full analysis payload for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    pub symbol: String,
    pub timeframe: String,
    pub data: Vec<IndicatorRow>,
    pub latest_signal: TradeSignal,
}
