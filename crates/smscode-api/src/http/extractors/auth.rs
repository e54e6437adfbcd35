//! HTTP Basic authentication extractor.
//!
//! Reads `Authorization: Basic <base64 user:pass>` and checks it against the
//! configured user table. Malformed headers are treated exactly like missing
//! ones.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use smscode_core::auth::Credentials;

use crate::http::error::AppError;
use crate::state::AppState;

/// An authenticated user. Extracting this validates the credentials.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub username: String,
    /// The user's page title override, if any.
    pub app_title: Option<String>,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = basic_credentials(&parts.headers);

        match state.authenticator.authenticate(credentials.as_ref()) {
            Some(user) => {
                let app_title = user.app_title.clone();
                let username = credentials.map(|c| c.username).unwrap_or_default();
                tracing::debug!(user = %username, "Authenticated request");
                Ok(Authenticated {
                    username,
                    app_title,
                })
            }
            None => {
                tracing::debug!(
                    credentials_present = credentials.is_some(),
                    "Authentication failed"
                );
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// Parse HTTP Basic credentials from the `Authorization` header.
///
/// The scheme name is case-insensitive and the password may contain colons;
/// only the first colon separates it from the username.
pub fn basic_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
