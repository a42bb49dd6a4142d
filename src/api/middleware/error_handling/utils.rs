use axum::http::{Method, StatusCode, Uri};
use tracing::{error, warn, Level};

use super::config::ErrorHandlingConfig;
use crate::application::ErrorRecord;
use crate::domain::RawError;

/// Method and URI of the request that failed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
}

impl RequestContext {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }
}

/// Error handling utilities
pub struct ErrorUtils;

impl ErrorUtils {
    /// Convert a stored status code, falling back to 500 for unusable values
    pub fn status_code(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Level an error answered with `status` is logged at, if at all
    pub fn log_level(status: StatusCode, config: &ErrorHandlingConfig) -> Option<Level> {
        if status.is_server_error() {
            Some(Level::ERROR)
        } else if status.is_client_error() && config.log_client_errors {
            Some(Level::WARN)
        } else {
            None
        }
    }

    /// Log a programmer error with everything we know; the client never sees this
    pub fn log_programmer_error(record: &ErrorRecord, ctx: &RequestContext) {
        error!(
            method = %ctx.method,
            uri = %ctx.uri,
            error_name = record.kind.name(),
            status_code = record.status_code,
            kind = ?record.kind,
            "ERROR: {}",
            record.message
        );
    }

    /// Log an error answered in development mode
    pub fn log_development_error(
        err: &RawError,
        ctx: &RequestContext,
        config: &ErrorHandlingConfig,
    ) {
        let status = Self::status_code(err.status_code_or_default());
        let level = Self::log_level(status, config);
        if level == Some(Level::ERROR) {
            error!(
                method = %ctx.method,
                uri = %ctx.uri,
                error_name = err.name(),
                "Server error: {} -> {}\n{}",
                status,
                err.message,
                err.stack_trace()
            );
        } else if level == Some(Level::WARN) {
            warn!(
                method = %ctx.method,
                uri = %ctx.uri,
                error_name = err.name(),
                "Client error: {} -> {}",
                status,
                err.message
            );
        }
    }

    /// Log an operational error answered in production mode
    pub fn log_operational_error(
        record: &ErrorRecord,
        ctx: &RequestContext,
        config: &ErrorHandlingConfig,
    ) {
        let status = Self::status_code(record.status_code);
        let level = Self::log_level(status, config);
        if level == Some(Level::ERROR) {
            error!(
                method = %ctx.method,
                uri = %ctx.uri,
                "Server error: {} {} {} -> {}",
                ctx.method,
                ctx.uri,
                status,
                record.message
            );
        } else if level == Some(Level::WARN) {
            warn!(
                method = %ctx.method,
                uri = %ctx.uri,
                "Client error: {} {} {} -> {}",
                ctx.method,
                ctx.uri,
                status,
                record.message
            );
        }
    }
}
