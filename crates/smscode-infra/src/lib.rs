//! Infrastructure layer for smscode.
//!
//! Implements the `MessageSource` trait from `smscode-core` against the
//! Messages SQLite database, and loads the configuration file.

pub mod config;
pub mod sqlite;
