pub mod error_types;
pub mod errors;

pub use error_types::{ErrorKind, FieldError, RawError};
pub use errors::{AppError, ErrorStatus};
