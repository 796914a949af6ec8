use super::{GenerateRequest, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Test double replaying canned answers in order and recording requests.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String>>>,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(AppError::LLMError(message.to_string()))])
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn generate(&self, _config: &LLMConfig, request: &GenerateRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::LLMError("No scripted reply left".to_string())))
    }
}

pub const SAMPLE_PREDICTION: &str = r#"{
    "prediction": "Elevated probability of heart disease",
    "risk_level": "High",
    "risk_score": 78,
    "confidence": 0.86,
    "clinical_analysis": "Reversible thal defect with one occluded vessel.",
    "orange_database_logic": "CA >= 1 and Thal 7 are the dominant splits.",
    "recommendations": ["Refer to cardiology", "Stress echocardiogram"],
    "feature_importance": [
        { "label": "Thal", "impact": 0.41, "description": "Reversible defect" },
        { "label": "CA", "impact": 0.33, "description": "One major vessel" },
        { "label": "Max HR", "impact": -0.08, "description": "Preserved capacity" }
    ]
}"#;
