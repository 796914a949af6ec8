pub mod parameter_store;
pub mod use_cases;

pub use parameter_store::ParameterStore;
pub use use_cases::risk_analysis::RiskAnalysisUseCase;
