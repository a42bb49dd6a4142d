use serde::{Deserialize, Serialize};

use crate::application::ClassifierRules;
use crate::config::{Config, Mode};

/// Message sent for every error that is not operational
pub const GENERIC_ERROR_MESSAGE: &str = "Something went very wrong!";

/// Error handling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// Deployment mode; development exposes the full error
    pub mode: Mode,
    /// Whether invalid tokens are reported as 401 instead of a generic 500
    pub classify_invalid_token: bool,
    /// Whether 4xx responses are logged as warnings
    pub log_client_errors: bool,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Production,
            classify_invalid_token: false,
            log_client_errors: true,
        }
    }
}

impl ErrorHandlingConfig {
    /// Create a new config with custom settings
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn development() -> Self {
        Self::new(Mode::Development)
    }

    pub fn production() -> Self {
        Self::new(Mode::Production)
    }

    /// Enable/disable 401 classification of invalid tokens
    pub fn with_invalid_token_classification(mut self, enabled: bool) -> Self {
        self.classify_invalid_token = enabled;
        self
    }

    /// Enable/disable client error logging
    pub fn with_client_error_logging(mut self, enabled: bool) -> Self {
        self.log_client_errors = enabled;
        self
    }

    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules {
            classify_invalid_token: self.classify_invalid_token,
        }
    }
}

impl From<&Config> for ErrorHandlingConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.mode)
            .with_invalid_token_classification(config.classify_invalid_token)
            .with_client_error_logging(config.log_client_errors)
    }
}
