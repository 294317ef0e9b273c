//! Service-layer error
//!
//! `ServiceError` bridges store errors and the API-layer `AppError` so
//! handlers and workflow functions can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    /// Storage error; database failures are logged and hidden from the client
    Store(StoreError),
    /// Business-rule error, passed through unchanged
    App(AppError),
}

impl ServiceError {
    /// Infrastructure failure with a log-only message
    pub fn internal(msg: impl Into<String>) -> Self {
        ServiceError::Store(StoreError::Database(msg.into()))
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(e: validator::ValidationErrors) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(StoreError::Database(msg)) => {
                tracing::error!(error = %msg, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
            ServiceError::Store(StoreError::NotFound(what)) => AppError::not_found(what),
            ServiceError::Store(StoreError::Duplicate(field)) => {
                AppError::new(ErrorCode::AlreadyExists).with_detail("field", field)
            }
            ServiceError::Store(StoreError::Validation(msg)) => AppError::validation(msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_is_opaque() {
        let err: AppError = ServiceError::internal("connection refused").into();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert!(!err.message.contains("connection"));
    }

    #[test]
    fn test_duplicate_carries_field() {
        let err: AppError = ServiceError::from(StoreError::Duplicate("email".into())).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(
            err.details.as_ref().and_then(|d| d.get("field")),
            Some(&serde_json::json!("email"))
        );
    }
}
