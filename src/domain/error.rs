use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an uploaded file could not be turned into a parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportError {
    /// No line looked like a data row.
    NoDataRowFound,
    /// A data row was found but split into fewer than ten values.
    IncompleteRow { found: usize },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::NoDataRowFound => write!(f, "no data row found"),
            ImportError::IncompleteRow { found } => {
                write!(f, "incomplete data row: expected 10 values, found {}", found)
            }
        }
    }
}

impl std::error::Error for ImportError {}

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    ValidationError(String),
    ParseError(String),
    Import(ImportError),
    LLMError(String),
    AnalysisUnavailable(String),
    ConfigError(String),
    IoError(String),
}

impl AppError {
    /// Message safe to show to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Import(ImportError::NoDataRowFound) => {
                "Unsupported file format. Please use Orange .tab or CSV.".to_string()
            }
            AppError::Import(ImportError::IncompleteRow { .. }) => {
                "Incomplete data row in file.".to_string()
            }
            AppError::AnalysisUnavailable(_) => {
                "Analysis Failed. Please verify your connection.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::Import(err) => write!(f, "Import error: {}", err),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::AnalysisUnavailable(msg) => write!(f, "Analysis unavailable: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::Import(err)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_errors_map_to_form_messages() {
        let no_row = AppError::from(ImportError::NoDataRowFound);
        assert_eq!(
            no_row.user_message(),
            "Unsupported file format. Please use Orange .tab or CSV."
        );

        let short = AppError::from(ImportError::IncompleteRow { found: 9 });
        assert_eq!(short.user_message(), "Incomplete data row in file.");
        assert!(short.to_string().contains("found 9"));
    }

    #[test]
    fn test_analysis_failure_hides_detail_from_user() {
        let err = AppError::AnalysisUnavailable("API error (503): overloaded".to_string());
        assert_eq!(
            err.user_message(),
            "Analysis Failed. Please verify your connection."
        );
        assert!(err.to_string().contains("503"));
    }
}
