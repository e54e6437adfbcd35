//! Shared domain types for smscode.
//!
//! Messages read from the store, configured users, the configuration file
//! shape, and the error enums shared by the other crates.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror, secrecy.

pub mod config;
pub mod error;
pub mod message;
pub mod user;
