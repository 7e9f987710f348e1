//! Disaster prediction records.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative risk attached to a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A mock disaster prediction.
///
/// Instances live in the bucket table and are handed out by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct DisasterPrediction {
    /// Disaster label, e.g. "Flood", or "Error" when no digest was available
    #[serde(rename = "type")]
    pub disaster_type: String,
    /// Confidence between 0 and 1
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
    pub recommendations: String,
}

impl DisasterPrediction {
    pub fn new(
        disaster_type: &str,
        confidence_score: f64,
        risk_level: RiskLevel,
        recommendations: &str,
    ) -> Self {
        Self {
            disaster_type: disaster_type.to_string(),
            confidence_score,
            risk_level,
            recommendations: recommendations.to_string(),
        }
    }

    /// Prediction returned when there is no digest to bucket
    pub fn insufficient_data() -> Self {
        Self::new(
            "Error",
            0.0,
            RiskLevel::Unknown,
            "Insufficient data for prediction.",
        )
    }

    /// Prediction returned if a byte is somehow not covered by any bucket
    pub fn no_match() -> Self {
        Self::new("None", 0.01, RiskLevel::Low, "No immediate action required.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_serializes_type_field() {
        let prediction = DisasterPrediction::new("Flood", 0.87, RiskLevel::High, "Move up.");
        let json = serde_json::to_value(&prediction).unwrap();

        assert_eq!(json["type"], "Flood");
        assert_eq!(json["confidence_score"], 0.87);
        assert_eq!(json["risk_level"], "High");
        assert_eq!(json["recommendations"], "Move up.");
        assert!(json.get("disaster_type").is_none());
    }

    #[test]
    fn test_insufficient_data_prediction() {
        let prediction = DisasterPrediction::insufficient_data();
        assert_eq!(prediction.disaster_type, "Error");
        assert_eq!(prediction.confidence_score, 0.0);
        assert_eq!(prediction.risk_level, RiskLevel::Unknown);
        assert_eq!(prediction.recommendations, "Insufficient data for prediction.");
    }
}
