use axum::{routing::get, Router};

use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::error_handling::{
    create_error_handling_middleware, ErrorHandlingConfig,
};

/// Create router with all routes and the error handling stage
pub fn create_router(config: ErrorHandlingConfig) -> Router {
    with_error_handling(Router::new().route("/health", get(health_handler)), config)
}

/// Add the 404 fallback and the terminal error layer to an application router
pub fn with_error_handling(router: Router, config: ErrorHandlingConfig) -> Router {
    router
        .fallback(not_found_handler)
        .layer(create_error_handling_middleware(config))
}
