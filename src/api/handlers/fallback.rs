use axum::http::Uri;

use crate::domain::AppError;

/// Any route nothing else matched
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found(format!("Can't find {} on this server!", uri))
}
