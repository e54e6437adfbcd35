//! SQLite storage layer.
//!
//! Read-only access to the Messages database through a small lazy
//! connection pool.

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;
pub mod store;
