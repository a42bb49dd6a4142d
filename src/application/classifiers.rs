//! Production reclassification of raw errors
//!
//! `project` strips a raw error down to plain data (no stack), then
//! `classify` rewrites known error kinds into operational [`AppError`]s.
//! Classification is exclusive: the first matching rule wins, in the order
//! cast, duplicate key, validation, invalid token, expired token.

use serde_json::Value;

use crate::domain::{AppError, ErrorKind, ErrorStatus, FieldError, RawError};

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token!, please log in again";
pub const EXPIRED_TOKEN_MESSAGE: &str = "Your token has expired! Please log in again";

/// Plain data view of an error, safe to hand to the production formatter
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
    pub status_code: u16,
    pub status: ErrorStatus,
    pub is_operational: bool,
}

impl From<AppError> for ErrorRecord {
    fn from(err: AppError) -> Self {
        Self {
            kind: ErrorKind::Operational,
            message: err.message,
            status_code: err.status_code,
            status: err.status,
            is_operational: err.is_operational,
        }
    }
}

/// Project a raw error onto the fields the production response needs
pub fn project(err: &RawError) -> ErrorRecord {
    ErrorRecord {
        kind: err.kind.clone(),
        message: err.message.clone(),
        status_code: err.status_code_or_default(),
        status: err.status_or_default(),
        is_operational: err.is_operational,
    }
}

/// Classification rules
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifierRules {
    /// Rewrite invalid tokens into a 401. Off by default: invalid tokens
    /// are then treated as programmer errors and answered with a 500.
    pub classify_invalid_token: bool,
}

/// Rewrite a record into an operational error when a rule matches
pub fn classify(record: ErrorRecord, rules: ClassifierRules) -> ErrorRecord {
    let classified = match &record.kind {
        ErrorKind::Cast { path, value } => Some(handle_cast_error(path, value)),
        ErrorKind::DuplicateKey { key_value } => Some(handle_duplicate_fields(key_value)),
        ErrorKind::Validation { errors } => Some(handle_validation_error(errors)),
        ErrorKind::InvalidToken if rules.classify_invalid_token => Some(handle_jwt_error()),
        ErrorKind::InvalidToken => None,
        ErrorKind::ExpiredToken => Some(handle_jwt_expired_error()),
        ErrorKind::Operational | ErrorKind::Unknown { .. } => None,
    };

    match classified {
        Some(app_error) => ErrorRecord {
            kind: record.kind,
            ..ErrorRecord::from(app_error)
        },
        None => record,
    }
}

pub fn handle_cast_error(path: &str, value: &Value) -> AppError {
    AppError::bad_request(format!("Invalid {}: {}", path, display_value(value)))
}

pub fn handle_duplicate_fields(key_value: &[(String, Value)]) -> AppError {
    let value = key_value
        .iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| display_value(value))
        .unwrap_or_else(|| "undefined".to_string());

    AppError::bad_request(format!(
        "Duplicate field value: {}. Please use another value",
        value
    ))
}

pub fn handle_validation_error(errors: &[FieldError]) -> AppError {
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    AppError::bad_request(format!("Invalid input data. {}", messages.join(". ")))
}

pub fn handle_jwt_error() -> AppError {
    AppError::unauthorized(INVALID_TOKEN_MESSAGE)
}

pub fn handle_jwt_expired_error() -> AppError {
    AppError::unauthorized(EXPIRED_TOKEN_MESSAGE)
}

/// Strings render bare, everything else as JSON text
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
