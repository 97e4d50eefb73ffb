use serde::{Deserialize, Serialize};

/// One OHLCV observation for a fixed time interval.
///
/// Series handed to the analysis pipeline are sorted ascending by `time`
/// with no duplicate timestamps and strictly positive price fields; the
/// market data service enforces this before anything downstream runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp in seconds (bar open time).
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Candle timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::OneHour
    }
}

impl Timeframe {
    /// Parse a timeframe from its query-string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "15m" => Some(Timeframe::FifteenMinutes),
            "1h" => Some(Timeframe::OneHour),
            "4h" => Some(Timeframe::FourHours),
            "1d" => Some(Timeframe::OneDay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "1d",
        }
    }

    /// Bar duration in seconds.
    pub fn step_seconds(&self) -> i64 {
        match self {
            Timeframe::FifteenMinutes => 900,
            Timeframe::OneHour => 3600,
            Timeframe::FourHours => 14400,
            Timeframe::OneDay => 86400,
        }
    }

    /// Interval string for the Binance klines endpoint.
    pub fn binance_interval(&self) -> &'static str {
        self.as_str()
    }

    /// Interval string for the Yahoo Finance chart endpoint.
    pub fn yahoo_interval(&self) -> &'static str {
        match self {
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "1h",
            Timeframe::OneDay => "1d",
        }
    }

    /// Range string wide enough to cover a typical request on Yahoo.
    pub fn yahoo_range(&self) -> &'static str {
        match self {
            Timeframe::FifteenMinutes => "5d",
            Timeframe::OneHour => "1mo",
            Timeframe::FourHours => "3mo",
            Timeframe::OneDay => "1y",
        }
    }
}

/// Market an instrument trades on; selects the upstream data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Crypto,
    Forex,
    Stock,
}

impl Default for Market {
    fn default() -> Self {
        Market::Crypto
    }
}

impl Market {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "crypto" => Some(Market::Crypto),
            "forex" => Some(Market::Forex),
            "stock" => Some(Market::Stock),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Crypto => "crypto",
            Market::Forex => "forex",
            Market::Stock => "stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_roundtrip() {
        for tf in ["15m", "1h", "4h", "1d"] {
            assert_eq!(Timeframe::from_str(tf).unwrap().as_str(), tf);
        }
        assert!(Timeframe::from_str("7m").is_none());
    }

    #[test]
    fn test_timeframe_step_seconds() {
        assert_eq!(Timeframe::FifteenMinutes.step_seconds(), 900);
        assert_eq!(Timeframe::OneDay.step_seconds(), 86400);
    }

    #[test]
    fn test_market_from_str() {
        assert_eq!(Market::from_str("crypto"), Some(Market::Crypto));
        assert_eq!(Market::from_str("forex"), Some(Market::Forex));
        assert!(Market::from_str("bonds").is_none());
    }

    #[test]
    fn test_candle_serialization() {
        let candle = Candle {
            time: 1_700_000_000,
            open: 100.0,
            high: 105.0,
            low: 99.0,
            close: 104.0,
            volume: 1234.5,
        };
        let json = serde_json::to_string(&candle).unwrap();
        assert!(json.contains("\"close\":104.0"));
        let back: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, candle);
    }
}
