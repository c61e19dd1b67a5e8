use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Prompt for {field} failed: {message}")]
    PromptError { field: String, message: String },

    #[error("Input stream closed")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistryError::ConfigError { .. }
            | RegistryError::ConfigValidationError { .. }
            | RegistryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RegistryError::PromptError { .. } | RegistryError::InputClosed => ErrorCategory::Input,
            RegistryError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 輸入結束視為正常離開
            RegistryError::InputClosed => ErrorSeverity::Low,
            RegistryError::PromptError { .. } => ErrorSeverity::Medium,
            RegistryError::ConfigError { .. }
            | RegistryError::ConfigValidationError { .. }
            | RegistryError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            RegistryError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::IoError(e) => format!("Terminal I/O failed: {}", e),
            RegistryError::ConfigError { message } => format!("Invalid configuration: {}", message),
            RegistryError::ConfigValidationError { field, message } => {
                format!("Invalid configuration at '{}': {}", field, message)
            }
            RegistryError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            RegistryError::PromptError { field, message } => {
                format!("Could not read '{}': {}", field, message)
            }
            RegistryError::InputClosed => "Input ended, leaving the registry.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the --config TOML file, or run without it to use the built-in seed data"
            }
            ErrorCategory::Input => "Run the program from an interactive terminal",
            ErrorCategory::System => "Check that stdin and stdout are available and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_closed_is_low_severity() {
        let err = RegistryError::InputClosed;
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = RegistryError::InvalidConfigValueError {
            field: "courses[0].id".to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("courses[0].id"));
    }
}
