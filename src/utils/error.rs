use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File not found: {path}")]
    InputNotFound { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    System,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::InputNotFound { .. } => ErrorCategory::Input,
            ConvertError::ConfigError { .. } | ConvertError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ConvertError::CsvError(_) => ErrorCategory::Data,
            ConvertError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::InputNotFound { .. } => {
                "Check the path of the exported CSV file and run again"
            }
            ConvertError::ConfigError { .. } => "Fix the syntax of the mapping TOML file",
            ConvertError::InvalidConfigValueError { .. } => {
                "Correct the reported option or mapping value"
            }
            ConvertError::CsvError(_) => {
                "Make sure the export is a UTF-8 CSV file with a header row"
            }
            ConvertError::IoError(_) => {
                "Check file permissions and free disk space for the output directory"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::InputNotFound { path } => format!("File not found: {}", path),
            ConvertError::CsvError(e) => format!("Could not parse the export: {}", e),
            ConvertError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_message() {
        let err = ConvertError::InputNotFound {
            path: "export.csv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.user_friendly_message(), "File not found: export.csv");
    }

    #[test]
    fn test_io_error_is_system() {
        let err: ConvertError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert!(err.user_friendly_message().contains("denied"));
    }
}
