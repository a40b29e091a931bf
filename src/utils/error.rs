use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Bundled data error in {source_name}: {message}")]
    BundledDataError {
        source_name: String,
        message: String,
    },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Data,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortfolioError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        PortfolioError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        PortfolioError::StorageError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::HttpError(_) => ErrorCategory::Network,
            PortfolioError::IoError(_) | PortfolioError::StorageError { .. } => {
                ErrorCategory::Storage
            }
            PortfolioError::SerializationError(_) | PortfolioError::BundledDataError { .. } => {
                ErrorCategory::Data
            }
            PortfolioError::ConfigError { .. }
            | PortfolioError::MissingConfigError { .. }
            | PortfolioError::InvalidConfigValueError { .. }
            | PortfolioError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PortfolioError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PortfolioError::HttpError(_) => {
                "Check that the API base URL is reachable, or run with --static-mode".to_string()
            }
            PortfolioError::IoError(_) | PortfolioError::StorageError { .. } => {
                "Check that the cache directory exists and is writable, or run with --no-cache"
                    .to_string()
            }
            PortfolioError::SerializationError(_) => {
                "The payload is not valid JSON for the expected record shape".to_string()
            }
            PortfolioError::BundledDataError { source_name, .. } => {
                format!("Fix or remove the bundled file '{}'", source_name)
            }
            PortfolioError::ConfigError { .. }
            | PortfolioError::ConfigValidationError { .. } => {
                "Review the configuration file and environment overrides".to_string()
            }
            PortfolioError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            PortfolioError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            PortfolioError::ValidationError { field, .. } => {
                format!("Correct the '{}' field and submit again", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortfolioError::HttpError(_) => "Network error. Please check your connection.".to_string(),
            PortfolioError::ValidationError { message, .. } => message.clone(),
            PortfolioError::ConfigError { .. }
            | PortfolioError::MissingConfigError { .. }
            | PortfolioError::InvalidConfigValueError { .. }
            | PortfolioError::ConfigValidationError { .. } => format!("Invalid configuration: {}", self),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// 請求失敗的兩種類型：傳輸層 (Timeout / Network) 與邏輯層 (Status / Malformed)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error - could not reach server: {0}")]
    Network(String),

    #[error("server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl FetchFailure {
    /// 沒有收到任何回應
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchFailure::Timeout(_) | FetchFailure::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classification() {
        assert!(FetchFailure::Timeout(Duration::from_secs(1)).is_transport());
        assert!(FetchFailure::Network("refused".into()).is_transport());
        assert!(!FetchFailure::Status {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
        assert!(!FetchFailure::Malformed("eof".into()).is_transport());
    }

    #[test]
    fn test_validation_error_is_low_severity() {
        let err = PortfolioError::validation("email", "Please enter a valid email address");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Please enter a valid email address");
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = PortfolioError::MissingConfigError {
            field: "api.base_url".into(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("api.base_url"));
    }
}
