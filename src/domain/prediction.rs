use crate::domain::parameters::ParameterSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Contribution of one parameter to the predicted risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub label: String,
    /// Signed magnitude; negative values lower the risk
    pub impact: f64,
    pub description: String,
}

/// Structured answer returned by the analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictionResult {
    #[validate(length(min = 1))]
    pub prediction: String,
    pub risk_level: RiskLevel,
    #[validate(range(min = 0.0, max = 100.0))]
    pub risk_score: f64,
    pub confidence: f64,
    pub clinical_analysis: String,
    pub orange_database_logic: String,
    pub recommendations: Vec<String>,
    pub feature_importance: Vec<FeatureImpact>,
}

/// A successful analysis together with the inputs it was run on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub parameters: ParameterSet,
    pub result: PredictionResult,
}

impl AnalysisRecord {
    pub fn new(parameters: ParameterSet, result: PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            parameters,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(score: f64) -> String {
        format!(
            r#"{{
                "prediction": "Elevated risk of heart disease",
                "risk_level": "High",
                "risk_score": {},
                "confidence": 0.87,
                "clinical_analysis": "Thal 6 and CA 1 dominate.",
                "orange_database_logic": "Threshold rules on CA, Thal, Oldpeak.",
                "recommendations": ["Cardiology referral"],
                "feature_importance": [
                    {{ "label": "Thal", "impact": 0.42, "description": "Fixed defect" }},
                    {{ "label": "Maxhr", "impact": -0.1, "description": "Good capacity" }}
                ]
            }}"#,
            score
        )
    }

    #[test]
    fn test_deserialize_prediction() {
        let result: PredictionResult = serde_json::from_str(&sample_json(78.0)).unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.feature_importance.len(), 2);
        assert!(result.feature_importance[1].impact < 0.0);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_score_out_of_range_is_invalid() {
        let result: PredictionResult = serde_json::from_str(&sample_json(140.0)).unwrap();
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_unknown_risk_level_rejected() {
        let json = sample_json(10.0).replace("\"High\"", "\"Severe\"");
        assert!(serde_json::from_str::<PredictionResult>(&json).is_err());
    }
}
