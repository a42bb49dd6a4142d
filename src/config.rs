use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deployment mode controlling how much error detail reaches clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    /// Anything other than "development" is treated as production
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Mode::Development,
            _ => Mode::Production,
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid mode: {0} (expected development or production)")]
    InvalidMode(String),

    #[error("LISTEN_ADDR cannot be empty")]
    EmptyListenAddr,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub listen_addr: String,
    pub classify_invalid_token: bool,
    pub log_client_errors: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            mode: lookup("APP_ENV")
                .or_else(|| lookup("NODE_ENV"))
                .map(|s| Mode::parse_lenient(&s))
                .unwrap_or_default(),
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            classify_invalid_token: lookup("CLASSIFY_INVALID_TOKEN")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            log_client_errors: lookup("LOG_CLIENT_ERRORS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.trim().is_empty() {
            return Err(ConfigError::EmptyListenAddr);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("development".parse::<Mode>(), Ok(Mode::Development));
        assert_eq!("Production".parse::<Mode>(), Ok(Mode::Production));
        assert!("staging".parse::<Mode>().is_err());
    }

    #[test]
    fn test_unknown_mode_is_production() {
        assert_eq!(Mode::parse_lenient("staging"), Mode::Production);
        assert_eq!(Mode::parse_lenient(""), Mode::Production);
        assert_eq!(Mode::parse_lenient(" development "), Mode::Development);
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert!(!config.classify_invalid_token);
        assert!(config.log_client_errors);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_env_takes_precedence_over_node_env() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("NODE_ENV", "development"),
        ]));
        assert_eq!(config.mode, Mode::Production);

        let config = Config::from_lookup(lookup_from(&[("NODE_ENV", "development")]));
        assert_eq!(config.mode, Mode::Development);
    }

    #[test]
    fn test_unrecognized_env_mode_is_production() {
        let config = Config::from_lookup(lookup_from(&[("APP_ENV", "staging")]));
        assert_eq!(config.mode, Mode::Production);
    }

    #[test]
    fn test_from_lookup_parses_flags_and_addr() {
        let config = Config::from_lookup(lookup_from(&[
            ("LISTEN_ADDR", "127.0.0.1:3000"),
            ("CLASSIFY_INVALID_TOKEN", "true"),
            ("LOG_CLIENT_ERRORS", "false"),
        ]));
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert!(config.classify_invalid_token);
        assert!(!config.log_client_errors);

        // unparseable flags keep their defaults
        let config = Config::from_lookup(lookup_from(&[("CLASSIFY_INVALID_TOKEN", "yes")]));
        assert!(!config.classify_invalid_token);
    }

    #[test]
    fn test_validate_listen_addr() {
        let config = Config {
            mode: Mode::Production,
            listen_addr: "  ".to_string(),
            classify_invalid_token: false,
            log_client_errors: true,
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyListenAddr));
    }
}
