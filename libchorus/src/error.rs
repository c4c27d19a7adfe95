//! Error types for Chorus

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChorusError>;

#[derive(Error, Debug)]
pub enum ChorusError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Missing sub-state: '{0}' branch is not initialized")]
    MissingSubState(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Effect error: {0}")]
    Effect(String),
}

impl ChorusError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ChorusError::InvalidEvent(_) => 3,
            ChorusError::MissingSubState(_) => 1,
            ChorusError::Config(_) => 1,
            ChorusError::Effect(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_event() {
        let error = ChorusError::InvalidEvent("duplicate friend id 1".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_missing_sub_state() {
        let error = ChorusError::MissingSubState("friend");
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = ChorusError::Config(ConfigError::MissingField("config directory".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_invalid_event() {
        let error = ChorusError::InvalidEvent("unknown timeline id 7".to_string());
        assert_eq!(format!("{}", error), "Invalid event: unknown timeline id 7");
    }

    #[test]
    fn test_error_message_formatting_missing_sub_state() {
        let error = ChorusError::MissingSubState("timeline");
        assert_eq!(
            format!("{}", error),
            "Missing sub-state: 'timeline' branch is not initialized"
        );
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error: ChorusError =
            ConfigError::Invalid("like_failure_rate must be within [0, 1]".to_string()).into();
        assert_eq!(
            format!("{}", error),
            "Configuration error: Invalid value: like_failure_rate must be within [0, 1]"
        );
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("test".to_string());
        let chorus_error: ChorusError = config_error.into();

        match chorus_error {
            ChorusError::Config(_) => {
                // Success - correct conversion
            }
            _ => panic!("Expected ChorusError::Config"),
        }
    }
}
