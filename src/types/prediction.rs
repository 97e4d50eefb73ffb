use serde::{Deserialize, Serialize};

/// Predicted price direction for the next bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    InsufficientData,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

/// Confidence bucket for a directional forecast.
///
/// STRONG at confidence >= 70, MODERATE at >= 55, otherwise WEAK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStrength {
    Strong,
    Moderate,
    Weak,
}

impl SignalStrength {
    /// Bucket a 0-100 confidence score.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 70.0 {
            SignalStrength::Strong
        } else if confidence >= 55.0 {
            SignalStrength::Moderate
        } else {
            SignalStrength::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "STRONG",
            SignalStrength::Moderate => "MODERATE",
            SignalStrength::Weak => "WEAK",
        }
    }
}

/// User-facing directional forecast.
///
/// `prediction` is "UP"/"DOWN", or "WAIT" when there is not enough
/// history to fit a model; in the WAIT case the price-context fields
/// are absent and confidence is 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionDetails {
    pub prediction: String,
    pub confidence: f64,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<SignalStrength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_pct: Option<f64>,
    pub message: String,
}

impl PredictionDetails {
    /// Sentinel result for inputs too short to train on.
    pub fn insufficient_data() -> Self {
        Self {
            prediction: "WAIT".to_string(),
            confidence: 0.0,
            direction: Direction::InsufficientData,
            signal_strength: None,
            current_price: None,
            price_change_pct: None,
            message: "Not enough historical data for prediction".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"UP\"");
        assert_eq!(
            serde_json::to_string(&Direction::InsufficientData).unwrap(),
            "\"INSUFFICIENT_DATA\""
        );
    }

    #[test]
    fn test_strength_buckets() {
        assert_eq!(SignalStrength::from_confidence(85.0), SignalStrength::Strong);
        assert_eq!(SignalStrength::from_confidence(70.0), SignalStrength::Strong);
        assert_eq!(
            SignalStrength::from_confidence(60.0),
            SignalStrength::Moderate
        );
        assert_eq!(SignalStrength::from_confidence(55.0), SignalStrength::Moderate);
        assert_eq!(SignalStrength::from_confidence(54.9), SignalStrength::Weak);
    }

    #[test]
    fn test_wait_payload_omits_price_context() {
        let details = PredictionDetails::insufficient_data();
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["prediction"], "WAIT");
        assert_eq!(json["confidence"], 0.0);
        assert_eq!(json["direction"], "INSUFFICIENT_DATA");
        assert!(json.get("current_price").is_none());
        assert!(json.get("signal_strength").is_none());
    }
}
