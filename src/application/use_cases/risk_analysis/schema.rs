use serde_json::{json, Value};

/// Gemini `responseSchema` describing `PredictionResult`
pub(crate) fn prediction_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "prediction": { "type": "STRING" },
            "risk_level": { "type": "STRING", "enum": ["Low", "Medium", "High"] },
            "risk_score": { "type": "NUMBER" },
            "confidence": { "type": "NUMBER" },
            "clinical_analysis": { "type": "STRING" },
            "orange_database_logic": { "type": "STRING" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } },
            "feature_importance": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "impact": { "type": "NUMBER" },
                        "description": { "type": "STRING" }
                    }
                }
            }
        },
        "required": [
            "prediction",
            "risk_level",
            "risk_score",
            "confidence",
            "clinical_analysis",
            "orange_database_logic",
            "recommendations",
            "feature_importance"
        ]
    })
}
