//! HTTP request handlers.

pub mod codes;
