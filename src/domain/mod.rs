pub mod error;
pub mod field_schema;
pub mod llm_config;
pub mod parameters;
pub mod prediction;
