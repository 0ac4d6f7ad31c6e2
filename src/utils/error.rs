use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigError { field: String, message: String },

    #[error("Validation failed, missing fields: {}", .missing_fields.join(", "))]
    ValidationError { missing_fields: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Request was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Export,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrendError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::Cancelled => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::ZipError(_)
            | Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorCategory::Export,
            Self::InternalError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cancelled => ErrorSeverity::Low,
            Self::ValidationError { .. } | Self::ConfigError { .. } | Self::TomlError(_) => {
                ErrorSeverity::Medium
            }
            Self::ZipError(_)
            | Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { missing_fields } => {
                format!("Please fill in the required fields: {}", missing_fields.join(", "))
            }
            Self::ConfigError { field, message } => {
                format!("The configuration value '{}' is invalid: {}", field, message)
            }
            Self::TomlError(_) => "The configuration file could not be read as TOML".to_string(),
            Self::Cancelled => "The analysis was cancelled before it finished".to_string(),
            Self::InternalError { .. } => {
                "Failed to analyze trends. Please try again.".to_string()
            }
            Self::ZipError(_)
            | Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_) => format!("Export failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if matches!(self, Self::Cancelled) {
            return "Run the analysis again without cancelling it";
        }
        match self.category() {
            ErrorCategory::Input => "Provide both --domain and --country, then run again",
            ErrorCategory::Configuration => "Check the TOML file and command-line flags",
            ErrorCategory::Export => "Check that the output directory exists and is writable",
            ErrorCategory::Internal => "Report the catalog entry that triggered this failure",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_missing_fields() {
        let err = TrendError::ValidationError {
            missing_fields: vec!["domain".to_string(), "country".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Validation failed, missing fields: domain, country"
        );
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("domain, country"));
    }

    #[test]
    fn test_internal_error_is_critical() {
        let err = TrendError::internal("score out of range");
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_io_error_maps_to_export() {
        let err: TrendError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::Export);
        assert!(err.severity() > ErrorSeverity::Medium);
    }
}
