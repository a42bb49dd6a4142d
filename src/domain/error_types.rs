//! Raw error values as they leave request handlers
//!
//! A `RawError` is whatever a handler failed with, before it has been
//! normalized into an [`AppError`]. The `ErrorKind` tag replaces sniffing
//! `name`/`code` fields at runtime, so classification is a plain `match`.

use std::backtrace::{Backtrace, BacktraceStatus};

use serde_json::{json, Map, Value};

use super::errors::{AppError, ErrorStatus};

/// Mongo-style duplicate key error code
pub const DUPLICATE_KEY_CODE: u32 = 11000;

/// One failing field of a validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Discriminant of a raw error
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// A value could not be cast to the type a field expects
    Cast { path: String, value: Value },
    /// A unique index rejected a write; entries keep insertion order
    DuplicateKey { key_value: Vec<(String, Value)> },
    /// One or more fields failed validation; entries keep insertion order
    Validation { errors: Vec<FieldError> },
    /// A bearer token failed verification
    InvalidToken,
    /// A bearer token was well formed but past its expiry
    ExpiredToken,
    /// An already normalized error raised by a handler
    Operational,
    /// Anything else: a programmer error
    Unknown { name: String },
}

impl ErrorKind {
    /// Legacy `name` discriminant, as clients of the dev output expect it
    pub fn name(&self) -> &str {
        match self {
            ErrorKind::Cast { .. } => "CastError",
            ErrorKind::DuplicateKey { .. } => "MongoError",
            ErrorKind::Validation { .. } => "ValidationError",
            ErrorKind::InvalidToken => "JsonWebTokenError",
            ErrorKind::ExpiredToken => "TokenExpiredError",
            ErrorKind::Operational => "AppError",
            ErrorKind::Unknown { name } => name,
        }
    }

    /// Kind-specific fields of the error object
    fn write_fields(&self, obj: &mut Map<String, Value>) {
        match self {
            ErrorKind::Cast { path, value } => {
                obj.insert("path".to_string(), json!(path));
                obj.insert("value".to_string(), value.clone());
            }
            ErrorKind::DuplicateKey { key_value } => {
                let key_value: Map<String, Value> = key_value.iter().cloned().collect();
                obj.insert("code".to_string(), json!(DUPLICATE_KEY_CODE));
                obj.insert("keyValue".to_string(), Value::Object(key_value));
            }
            ErrorKind::Validation { errors } => {
                let errors: Map<String, Value> = errors
                    .iter()
                    .map(|e| (e.field.clone(), json!({ "message": e.message })))
                    .collect();
                obj.insert("errors".to_string(), Value::Object(errors));
            }
            ErrorKind::InvalidToken
            | ErrorKind::ExpiredToken
            | ErrorKind::Operational
            | ErrorKind::Unknown { .. } => {}
        }
    }
}

/// An error on its way to the error responder
#[derive(Debug, Clone, PartialEq)]
pub struct RawError {
    pub kind: ErrorKind,
    pub message: String,
    pub status_code: Option<u16>,
    pub status: Option<ErrorStatus>,
    pub is_operational: bool,
    pub stack: Option<String>,
}

impl RawError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            status: None,
            is_operational: false,
            stack: capture_backtrace(),
        }
    }

    pub fn cast(path: impl Into<String>, value: impl Into<Value>) -> Self {
        let path = path.into();
        let value = value.into();
        let message = format!(
            "Cast failed for value {} at path \"{}\"",
            value, path
        );
        Self::new(ErrorKind::Cast { path, value }, message)
    }

    pub fn duplicate_key<I, K, V>(key_value: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let key_value: Vec<(String, Value)> = key_value
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let message = format!("E{} duplicate key error", DUPLICATE_KEY_CODE);
        Self::new(ErrorKind::DuplicateKey { key_value }, message)
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        let details: Vec<String> = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        let message = format!("Validation failed: {}", details.join(", "));
        Self::new(ErrorKind::Validation { errors }, message)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    pub fn expired_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExpiredToken, message)
    }

    pub fn programmer(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown { name: name.into() }, message)
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Fill in `statusCode` 500 and `status` "error" where they are missing
    pub fn ensure_defaults(&mut self) {
        if self.status_code.is_none() {
            self.status_code = Some(500);
        }
        if self.status.is_none() {
            self.status = Some(ErrorStatus::Error);
        }
    }

    pub fn status_code_or_default(&self) -> u16 {
        self.status_code.unwrap_or(500)
    }

    pub fn status_or_default(&self) -> ErrorStatus {
        self.status.unwrap_or(ErrorStatus::Error)
    }

    /// Stack text: a `name: message` header followed by any captured frames
    pub fn stack_trace(&self) -> String {
        let header = format!("{}: {}", self.name(), self.message);
        match &self.stack {
            Some(frames) if !frames.is_empty() => format!("{}\n{}", header, frames),
            _ => header,
        }
    }

    /// The full error object, as shown in development responses
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(self.name()));
        obj.insert("message".to_string(), json!(self.message));
        obj.insert(
            "statusCode".to_string(),
            json!(self.status_code_or_default()),
        );
        obj.insert("status".to_string(), json!(self.status_or_default()));
        obj.insert("isOperational".to_string(), json!(self.is_operational));
        self.kind.write_fields(&mut obj);
        Value::Object(obj)
    }
}

impl From<AppError> for RawError {
    fn from(err: AppError) -> Self {
        Self {
            kind: ErrorKind::Operational,
            message: err.message,
            status_code: Some(err.status_code),
            status: Some(err.status),
            is_operational: err.is_operational,
            stack: capture_backtrace(),
        }
    }
}

impl std::fmt::Display for RawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name(), self.message)
    }
}

impl std::error::Error for RawError {}

fn capture_backtrace() -> Option<String> {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}
