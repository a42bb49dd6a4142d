use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-facing error class derived from the HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    /// The client sent something we refuse (4xx)
    Fail,
    /// The server failed (5xx and anything else)
    Error,
}

impl ErrorStatus {
    pub fn from_status_code(status_code: u16) -> Self {
        if (400..500).contains(&status_code) {
            ErrorStatus::Fail
        } else {
            ErrorStatus::Error
        }
    }
}

/// An anticipated failure that is safe to describe to the client.
///
/// Classifiers return this, and handlers may return it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    pub message: String,
    pub status_code: u16,
    pub status: ErrorStatus,
    pub is_operational: bool,
}

impl AppError {
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            status: ErrorStatus::from_status_code(status_code),
            is_operational: true,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, 400)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, 401)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, 404)
    }
}
