use axum::{http::StatusCode, response::Response};

use super::error_response;

/// Fallback for unrouted paths.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
