use thiserror::Error;

#[derive(Error, Debug)]
pub enum SketchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

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

    #[error("Unknown sketch variant: {name}")]
    UnknownVariant { name: String },

    #[error("Template error in {template}: {message}")]
    TemplateError { template: String, message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Template,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SketchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SketchError::TomlParseError(_)
            | SketchError::ConfigError { .. }
            | SketchError::MissingConfigError { .. }
            | SketchError::InvalidConfigValueError { .. }
            | SketchError::UnknownVariant { .. } => ErrorCategory::Configuration,
            SketchError::TemplateError { .. } => ErrorCategory::Template,
            SketchError::IoError(_)
            | SketchError::SerializationError(_)
            | SketchError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 連接埠被占用之類的問題，稍後重試即可
            SketchError::ServerError { .. } => ErrorSeverity::Medium,
            SketchError::IoError(_) | SketchError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SketchError::IoError(_) => "Check that the file exists and is readable".to_string(),
            SketchError::SerializationError(_) => {
                "Report this as a bug; the output could not be encoded".to_string()
            }
            SketchError::TomlParseError(_) => {
                "Check the config file syntax against the TOML format".to_string()
            }
            SketchError::ConfigError { .. } => "Review the configuration values".to_string(),
            SketchError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or environment", field)
            }
            SketchError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            SketchError::UnknownVariant { .. } => {
                "Run `sketch-edge list` to see the available variants".to_string()
            }
            SketchError::TemplateError { .. } => {
                "The sketch template references a parameter that does not exist".to_string()
            }
            SketchError::ServerError { .. } => {
                "Check that the host/port is free and try again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Template => format!("Could not build the page: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = SketchError::UnknownVariant {
            name: "nope".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("nope"));
    }

    #[test]
    fn test_missing_field_exits_with_one() {
        let err = SketchError::MissingConfigError {
            field: "assets[0]".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("assets[0]"));
    }

    #[test]
    fn test_every_error_exits_nonzero() {
        let errors = [
            SketchError::ConfigError {
                message: "x".to_string(),
            },
            SketchError::TemplateError {
                template: "waveform".to_string(),
                message: "x".to_string(),
            },
            SketchError::ServerError {
                message: "x".to_string(),
            },
            SketchError::IoError(std::io::Error::other("x")),
        ];
        for err in errors {
            assert!(err.exit_code() > 0, "{}", err);
        }
    }

    #[test]
    fn test_server_error_is_retryable() {
        let err = SketchError::ServerError {
            message: "address in use".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.recovery_suggestion().contains("port"));
    }
}
