//! Terminal error responder
//!
//! Turns a [`RawError`] into exactly one JSON response. Development mode
//! sends the whole error including its stack; production mode reclassifies
//! known errors and hides everything that is not operational.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::config::{ErrorHandlingConfig, GENERIC_ERROR_MESSAGE};
use super::utils::{ErrorUtils, RequestContext};
use crate::application::{classify, project, ErrorRecord};
use crate::config::Mode;
use crate::domain::{ErrorStatus, RawError};

#[derive(Debug, Serialize)]
struct DevErrorResponse {
    status: ErrorStatus,
    error: Value,
    message: String,
    stack: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: ErrorStatus,
    message: String,
}

#[derive(Debug, Clone)]
pub struct ErrorResponder {
    config: ErrorHandlingConfig,
}

impl ErrorResponder {
    pub fn new(config: ErrorHandlingConfig) -> Self {
        Self { config }
    }

    /// Write the response for a failed request
    pub fn respond(&self, mut err: RawError, ctx: &RequestContext) -> Response {
        err.ensure_defaults();
        // Report the code that is actually sent
        let sent = ErrorUtils::status_code(err.status_code_or_default());
        err.status_code = Some(sent.as_u16());

        match self.config.mode {
            Mode::Development => self.send_error_dev(&err, ctx),
            Mode::Production => {
                let record = classify(project(&err), self.config.classifier_rules());
                self.send_error_prod(record, ctx)
            }
        }
    }

    fn send_error_dev(&self, err: &RawError, ctx: &RequestContext) -> Response {
        ErrorUtils::log_development_error(err, ctx, &self.config);

        let body = DevErrorResponse {
            status: err.status_or_default(),
            error: err.to_json(),
            message: err.message.clone(),
            stack: err.stack_trace(),
        };

        (
            ErrorUtils::status_code(err.status_code_or_default()),
            Json(body),
        )
            .into_response()
    }

    fn send_error_prod(&self, record: ErrorRecord, ctx: &RequestContext) -> Response {
        if record.is_operational {
            ErrorUtils::log_operational_error(&record, ctx, &self.config);

            let status_code = ErrorUtils::status_code(record.status_code);
            let body = ErrorResponse {
                status: record.status,
                message: record.message,
            };
            return (status_code, Json(body)).into_response();
        }

        ErrorUtils::log_programmer_error(&record, ctx);

        let body = ErrorResponse {
            status: ErrorStatus::Error,
            message: GENERIC_ERROR_MESSAGE.to_string(),
        };
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(body),
        )
            .into_response()
    }
}
