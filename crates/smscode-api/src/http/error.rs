//! Application error type mapping to HTTP status codes and plain text bodies.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use smscode_types::error::{RenderError, StorageError};

use crate::http::BASIC_CHALLENGE;

/// Request failures, one per terminal branch of the pipeline.
#[derive(Debug)]
pub enum AppError {
    /// The admission bucket would make the request wait too long.
    TooManyRequests,
    /// Missing or invalid credentials.
    Unauthorized,
    /// The message store could not be read.
    Storage(StorageError),
    /// The page could not be rendered.
    Render(RenderError),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::TooManyRequests => {
                (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests".to_string())
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Login Required".to_string()),
            AppError::Storage(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let mut response = (
            status,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            message,
        )
            .into_response();

        // Rejected requests never reached the authentication step.
        if !matches!(self, AppError::TooManyRequests) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }

        response
    }
}
