pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use errors::ApiResult;
pub use router::{create_router, with_error_handling};
