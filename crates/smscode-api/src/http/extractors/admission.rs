//! Admission control extractor.

use std::time::Instant;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use smscode_core::admission::Admission;

use crate::http::error::AppError;
use crate::state::AppState;

/// Marker proving the request holds an admission token. Extraction sleeps
/// for the reserved wait, or rejects with 429 when the wait is too long.
pub struct Admitted;

impl FromRequestParts<AppState> for Admitted {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.admission.admit(Instant::now()) {
            Admission::Proceed { wait } => {
                if !wait.is_zero() {
                    tracing::debug!(wait_ms = wait.as_millis() as u64, "Delaying request");
                    tokio::time::sleep(wait).await;
                }
                Ok(Admitted)
            }
            Admission::Reject { wait } => {
                tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate limit exceeded");
                Err(AppError::TooManyRequests)
            }
        }
    }
}
