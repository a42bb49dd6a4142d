//! Error handling middleware
//!
//! The final stage of the request pipeline. Handlers fail with a
//! [`RawError`](crate::domain::RawError) (or an
//! [`AppError`](crate::domain::AppError)); this module turns it into the
//! single client-facing JSON response.
//!
//! The module is split into focused components:
//! - config.rs: Configuration structures
//! - middleware.rs: HTTP middleware implementation
//! - responder.rs: Development and production formatters
//! - utils.rs: Request context, status conversion and logging

pub mod config;
pub mod middleware;
pub mod responder;
pub mod utils;

pub use config::{ErrorHandlingConfig, GENERIC_ERROR_MESSAGE};
pub use middleware::{create_error_handling_middleware, ErrorHandlingLayer};
pub use responder::ErrorResponder;
pub use utils::{ErrorUtils, RequestContext};
