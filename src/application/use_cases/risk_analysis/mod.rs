mod prompts;
mod schema;

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::parameters::ParameterSet;
use crate::domain::prediction::{AnalysisRecord, PredictionResult};
use crate::infrastructure::llm_clients::{GenerateRequest, LLMClient};
use crate::infrastructure::response::extract_json_payload;
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

use prompts::{build_system_prompt, build_user_prompt};
use schema::prediction_response_schema;

const SNIPPET_LEN: usize = 300;

pub struct RiskAnalysisUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl RiskAnalysisUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    /// Sends the snapshot to the analysis service and validates the answer.
    ///
    /// Every failure, whether transport, status, or malformed output, comes back as
    /// `AppError::AnalysisUnavailable`. Nothing is retried.
    pub async fn execute(
        &self,
        config: &LLMConfig,
        parameters: ParameterSet,
    ) -> Result<AnalysisRecord> {
        let request = GenerateRequest {
            system: build_system_prompt(),
            user: build_user_prompt(&parameters),
            response_schema: Some(prediction_response_schema()),
        };

        let raw_output = self
            .llm_client
            .generate(config, &request)
            .await
            .map_err(|err| {
                error!(error = %err, "Risk analysis request failed");
                AppError::AnalysisUnavailable(err.to_string())
            })?;

        let result = parse_prediction(&raw_output).map_err(|err| {
            error!(error = %err, "Risk analysis returned unusable output");
            err
        })?;

        info!(
            risk_level = ?result.risk_level,
            risk_score = result.risk_score,
            "Risk analysis completed"
        );

        Ok(AnalysisRecord::new(parameters, result))
    }
}

fn parse_prediction(raw_output: &str) -> Result<PredictionResult> {
    let payload = extract_json_payload(raw_output);
    let result = serde_json::from_str::<PredictionResult>(&payload).map_err(|err| {
        AppError::AnalysisUnavailable(format!(
            "Failed to parse analysis output: {} | output_snippet={}",
            err,
            snippet(&payload)
        ))
    })?;

    result.validate().map_err(|err| {
        AppError::AnalysisUnavailable(format!("Analysis output failed validation: {}", err))
    })?;

    Ok(result)
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LEN).collect()
}
