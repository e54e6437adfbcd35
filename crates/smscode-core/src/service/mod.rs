//! Business logic services.

pub mod listing;
