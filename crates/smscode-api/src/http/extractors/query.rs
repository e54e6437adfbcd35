//! Query parameter extractors.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

/// Query parameters for the codes page.
///
/// Extraction never fails: an unparseable query string reads as empty, and a
/// repeated parameter takes its first value.
#[derive(Debug, Default)]
pub struct CodesQuery {
    /// `all=1` lists every message instead of only code messages.
    pub all: Option<String>,
}

impl CodesQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let all = pairs
            .into_iter()
            .find(|(key, _)| key == "all")
            .map(|(_, value)| value);
        Self { all }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CodesQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring malformed query string");
                Vec::new()
            }
        };
        Ok(Self::from_pairs(pairs))
    }
}
