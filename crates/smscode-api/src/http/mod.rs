//! HTTP layer for smscode.
//!
//! A single axum endpoint: admission control, HTTP Basic authentication,
//! then an HTML listing of recent code messages.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;

/// Challenge sent with every response past admission control.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="Login Required", charset="utf-8""#;
