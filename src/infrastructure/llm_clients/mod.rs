pub mod gemini;
#[cfg(test)]
pub mod scripted;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;

pub use gemini::GeminiClient;

/// One completion call: instructions, the user turn and, when structured
/// output is wanted, the JSON schema the answer must follow.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system: String,
    pub user: String,
    pub response_schema: Option<serde_json::Value>,
}

#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, request: &GenerateRequest) -> Result<String>;
}
