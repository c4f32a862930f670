use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use stubby_core::{ShortenerError, StorageError};
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    Shortener(ShortenerError),
    NotFound,
}

impl From<ShortenerError> for AppError {
    fn from(error: ShortenerError) -> Self {
        AppError::Shortener(error)
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Shortener(ShortenerError::InvalidUrl(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_url")
            }
            AppError::Shortener(ShortenerError::RetryExhausted { .. }) => {
                (StatusCode::SERVICE_UNAVAILABLE, "token_space_exhausted")
            }
            AppError::Shortener(ShortenerError::Storage(
                StorageError::Unavailable(_) | StorageError::Timeout(_),
            )) => (StatusCode::SERVICE_UNAVAILABLE, "storage_error"),
            AppError::Shortener(ShortenerError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            AppError::Shortener(ShortenerError::InvalidPolicy(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::NotFound => "short url not found".to_string(),
            AppError::Shortener(ShortenerError::InvalidUrl(message)) => message,
            AppError::Shortener(ShortenerError::RetryExhausted { attempts }) => {
                error!(attempts, "token space exhausted");
                "no free short url could be allocated, try again later".to_string()
            }
            // detail stays in the log
            AppError::Shortener(ShortenerError::Storage(e)) => {
                error!(error = %e, "storage failure");
                "storage backend failure".to_string()
            }
            AppError::Shortener(other) => {
                error!(error = %other, "request failed");
                "internal server error".to_string()
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: code,
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    async fn body(error: AppError) -> serde_json::Value {
        let bytes = axum::body::to_bytes(error.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(status(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ShortenerError::InvalidUrl("bad".into()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(ShortenerError::RetryExhausted { attempts: 15 }.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(ShortenerError::Storage(StorageError::Timeout("slow".into())).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(ShortenerError::Storage(StorageError::Query("syntax".into())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn invalid_policy_is_an_internal_error() {
        let error = || AppError::from(ShortenerError::InvalidPolicy("zero attempts".into()));

        assert_eq!(status(error()), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body(error()).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "internal server error");
    }

    #[tokio::test]
    async fn storage_detail_is_not_exposed() {
        let detail = "error returned from database: 1045 (28000): Access denied for user 'stubby'";

        for storage in [
            StorageError::Query(detail.to_string()),
            StorageError::Unavailable(detail.to_string()),
        ] {
            let body = body(ShortenerError::Storage(storage).into()).await;

            assert_eq!(body["error"], "storage_error");
            assert_eq!(body["message"], "storage backend failure");
            assert!(!body.to_string().contains("Access denied"));
        }
    }
}
