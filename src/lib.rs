//! # error_responder - Centralized HTTP Error Responses
//!
//! A single terminal stage for an axum service that turns every handler
//! failure into one uniform JSON response.
//!
//! ## Layers
//!
//! - **Domain**: raw errors as handlers produce them, and the normalized `AppError`
//! - **Application**: projection and classification of raw errors
//! - **API**: `IntoResponse` glue, the error handling layer, router
//!
//! ## Modes
//!
//! - **Development**: `{status, error, message, stack}` with the original status code
//! - **Production**: known errors are rewritten into safe messages; anything
//!   not operational becomes a generic 500
//!
//! ## Example Usage
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use error_responder::{api::with_error_handling, AppError, ErrorHandlingConfig};
//!
//! async fn get_tour() -> Result<&'static str, AppError> {
//!     Err(AppError::not_found("No tour found with that ID"))
//! }
//!
//! let app: Router = with_error_handling(
//!     Router::new().route("/v1/tours/{id}", get(get_tour)),
//!     ErrorHandlingConfig::production(),
//! );
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;

pub use api::middleware::error_handling::{ErrorHandlingConfig, ErrorResponder};
pub use config::{Config, Mode};
pub use domain::{AppError, ErrorKind, ErrorStatus, FieldError, RawError};
