use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::{AppError, FieldError, RawError};

/// Handlers return this; the error layer renders it
pub type ApiResult<T> = Result<T, RawError>;

impl IntoResponse for RawError {
    fn into_response(self) -> Response {
        // Placeholder until ErrorHandlingLayer replaces it
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        RawError::from(self).into_response()
    }
}

// Convert library errors to raw errors

impl From<jsonwebtoken::errors::Error> for RawError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                RawError::expired_token(err.to_string())
            }
            _ => RawError::invalid_token(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for RawError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = err
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));

        RawError::validation(errors)
    }
}

impl From<anyhow::Error> for RawError {
    fn from(err: anyhow::Error) -> Self {
        let stack = format!("{:?}", err);
        RawError::programmer("Error", err.to_string()).with_stack(stack)
    }
}

/// Parse a UUID path parameter, failing with a cast error
pub fn parse_uuid_param(path: &str, value: &str) -> Result<uuid::Uuid, RawError> {
    uuid::Uuid::parse_str(value).map_err(|_| RawError::cast(path, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use validator::Validate;

    #[derive(Validate)]
    struct SignupInput {
        #[validate(length(min = 1, message = "Please tell us your name"))]
        name: String,
        #[validate(email(message = "Please provide a valid email"))]
        email: String,
        #[validate(length(min = 8))]
        password: String,
    }

    #[test]
    fn test_raw_error_into_response_stores_error() {
        let response = RawError::cast("id", "abc").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let stored = response.extensions().get::<RawError>().unwrap();
        assert_eq!(stored.name(), "CastError");
    }

    #[test]
    fn test_app_error_into_response_is_operational() {
        let response = AppError::not_found("nope").into_response();
        let stored = response.extensions().get::<RawError>().unwrap();
        assert_eq!(stored.kind, ErrorKind::Operational);
        assert_eq!(stored.status_code, Some(404));
    }

    #[test]
    fn test_jwt_error_conversion() {
        use jsonwebtoken::errors::{Error, ErrorKind as JwtErrorKind};

        let expired: RawError = Error::from(JwtErrorKind::ExpiredSignature).into();
        assert_eq!(expired.kind, ErrorKind::ExpiredToken);

        let invalid: RawError = Error::from(JwtErrorKind::InvalidSignature).into();
        assert_eq!(invalid.kind, ErrorKind::InvalidToken);
        assert_eq!(invalid.name(), "JsonWebTokenError");
    }

    #[test]
    fn test_validation_errors_conversion() {
        let input = SignupInput {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let raw: RawError = input.validate().unwrap_err().into();

        match raw.kind {
            ErrorKind::Validation { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "name", "password"]);
                assert_eq!(errors[0].message, "Please provide a valid email");
                assert_eq!(errors[1].message, "Please tell us your name");
                assert_eq!(errors[2].message, "password is invalid");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_anyhow_conversion() {
        let err = anyhow::anyhow!("pool exhausted").context("loading tours");
        let raw: RawError = err.into();
        assert_eq!(raw.name(), "Error");
        assert_eq!(raw.message, "loading tours");
        assert!(raw.stack.unwrap().contains("pool exhausted"));
        assert!(!raw.is_operational);
    }

    #[test]
    fn test_parse_uuid_param() {
        assert!(parse_uuid_param("id", "5c88fa8cf4afda39709c2955").is_err());
        let err = parse_uuid_param("id", "abc").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Cast {
                path: "id".to_string(),
                value: serde_json::json!("abc")
            }
        );
        assert!(parse_uuid_param("id", "67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }
}
