pub mod risk_analysis;
pub mod risk_flags;
pub mod tab_export;
pub mod tabular_import;
