//! Request extractors. Axum runs them in argument order, which fixes the
//! pipeline order: admission, then authentication, then query parsing.

pub mod admission;
pub mod auth;
pub mod query;
