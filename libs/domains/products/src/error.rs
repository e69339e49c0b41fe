use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    /// Any failure of the backing store: pool exhaustion, timeout, SQL error
    #[error("{0}")]
    Store(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DatabaseError> for ProductError {
    fn from(err: DatabaseError) -> Self {
        ProductError::Store(err.to_string())
    }
}

impl From<sqlx::Error> for ProductError {
    fn from(err: sqlx::Error) -> Self {
        DatabaseError::from(err).into()
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Not found".to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Store(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
