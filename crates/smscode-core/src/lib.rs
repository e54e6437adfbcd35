//! Request pipeline logic and store trait definitions for smscode.
//!
//! This crate defines the `MessageSource` port that the infrastructure layer
//! implements, plus everything the HTTP handler composes: code detection,
//! admission control, credential checks, message selection and page
//! rendering. It depends only on `smscode-types` -- never on
//! `smscode-infra` or any database/IO crate.

pub mod admission;
pub mod auth;
pub mod matcher;
pub mod render;
pub mod repository;
pub mod service;
